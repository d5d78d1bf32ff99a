//! Client HTTP handlers
//!
//! Thin wrappers over `ClientService` and `ReservationService`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::{ClientService, ReservationService};
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::phone_numbers::PhoneNumberDto;
use crate::interfaces::http::modules::reservations::ReservationDto;

#[derive(Clone)]
pub struct ClientHandlerState {
    pub clients: Arc<ClientService>,
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    tag = "Clients",
    responses((status = 200, description = "All clients", body = ApiResponse<Vec<ClientDto>>))
)]
pub async fn list_clients(
    State(state): State<ClientHandlerState>,
) -> Result<Json<ApiResponse<Vec<ClientDto>>>, ApiError<Vec<ClientDto>>> {
    let clients = state.clients.list().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        clients.into_iter().map(ClientDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client with address and phone numbers", body = ApiResponse<ClientDetailsDto>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<ClientHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ClientDetailsDto>>, ApiError<ClientDetailsDto>> {
    let details = state.clients.get(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    tag = "Clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = ApiResponse<ClientDetailsDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_client(
    State(state): State<ClientHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClientDetailsDto>>), ApiError<ClientDetailsDto>> {
    let (client, address) = request.into_domain();
    let created = state
        .clients
        .create(client, address)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client ID")),
    request_body = AddPhoneRequest,
    responses(
        (status = 201, description = "Phone number attached", body = ApiResponse<PhoneNumberDto>),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Number already exists")
    )
)]
pub async fn add_client_phone(
    State(state): State<ClientHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<AddPhoneRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PhoneNumberDto>>), ApiError<PhoneNumberDto>> {
    let phone = state
        .clients
        .add_phone(id, request.into_domain(id))
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(phone.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Deleted client", body = ApiResponse<ClientDetailsDto>),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client still has invoices or reservations")
    )
)]
pub async fn delete_client(
    State(state): State<ClientHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ClientDetailsDto>>, ApiError<ClientDetailsDto>> {
    let deleted = state.clients.delete(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(deleted.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}/reservations",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client reservations, by day then room", body = ApiResponse<Vec<ReservationDto>>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn list_client_reservations(
    State(state): State<ClientHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError<Vec<ReservationDto>>> {
    let reservations = state
        .reservations
        .list_by_client(id)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}
