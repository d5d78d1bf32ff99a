//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::ReservationService;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub reservations: Arc<ReservationService>,
}

fn require_client<T>(query: &ClientQuery) -> Result<i32, ApiError<T>> {
    query.client_id.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("client_id query parameter is required")),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(DayQuery),
    responses(
        (status = 200, description = "Reservations of the day, by room", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Missing day")
    )
)]
pub async fn list_reservations_by_day(
    State(state): State<ReservationAppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError<Vec<ReservationDto>>> {
    let reservations = state
        .reservations
        .list_by_day(query.day)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ClientQuery),
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation booked", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request, unknown room or room unavailable"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn book_reservation(
    State(state): State<ReservationAppState>,
    Query(query): Query<ClientQuery>,
    ValidatedJson(request): ValidatedJson<ReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError<ReservationDto>> {
    let client_id = require_client(&query)?;
    let reservation = state
        .reservations
        .book(client_id, request.into())
        .await
        .map_err(api_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ClientQuery),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Client or reservation not found")
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationAppState>,
    Query(query): Query<ClientQuery>,
    ValidatedJson(request): ValidatedJson<ReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    let client_id = require_client(&query)?;
    let reservation = state
        .reservations
        .update(client_id, request.into())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ClientQuery),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Cancelled reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Client or reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Query(query): Query<ClientQuery>,
    ValidatedJson(request): ValidatedJson<ReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    let client_id = require_client(&query)?;
    let reservation = state
        .reservations
        .cancel(client_id, request.into())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}
