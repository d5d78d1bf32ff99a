//! Phone number HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{PhoneNumberDto, PhoneNumberRequest};
use crate::application::PhoneNumberService;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct PhoneNumberHandlerState {
    pub phone_numbers: Arc<PhoneNumberService>,
}

fn missing_owner<T>() -> ApiError<T> {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error("client_id is required")),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/phone-numbers",
    tag = "Phone numbers",
    responses((status = 200, description = "All phone numbers", body = ApiResponse<Vec<PhoneNumberDto>>))
)]
pub async fn list_phone_numbers(
    State(state): State<PhoneNumberHandlerState>,
) -> Result<Json<ApiResponse<Vec<PhoneNumberDto>>>, ApiError<Vec<PhoneNumberDto>>> {
    let phones = state.phone_numbers.list().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        phones.into_iter().map(PhoneNumberDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/phone-numbers/{number}",
    tag = "Phone numbers",
    params(("number" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Phone number", body = ApiResponse<PhoneNumberDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_phone_number(
    State(state): State<PhoneNumberHandlerState>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<PhoneNumberDto>>, ApiError<PhoneNumberDto>> {
    let phone = state.phone_numbers.get(&number).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(phone.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/phone-numbers",
    tag = "Phone numbers",
    request_body = PhoneNumberRequest,
    responses(
        (status = 201, description = "Phone number created", body = ApiResponse<PhoneNumberDto>),
        (status = 400, description = "Missing owner"),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "Number already exists")
    )
)]
pub async fn create_phone_number(
    State(state): State<PhoneNumberHandlerState>,
    ValidatedJson(request): ValidatedJson<PhoneNumberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PhoneNumberDto>>), ApiError<PhoneNumberDto>> {
    let Some(client_id) = request.client_id else {
        return Err(missing_owner());
    };
    let phone = state
        .phone_numbers
        .create(request.into_domain(client_id))
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(phone.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/phone-numbers/{number}",
    tag = "Phone numbers",
    params(("number" = String, Path, description = "Phone number")),
    request_body = PhoneNumberRequest,
    responses(
        (status = 200, description = "Phone number updated", body = ApiResponse<PhoneNumberDto>),
        (status = 400, description = "Path and body numbers differ"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_phone_number(
    State(state): State<PhoneNumberHandlerState>,
    Path(number): Path<String>,
    ValidatedJson(request): ValidatedJson<PhoneNumberRequest>,
) -> Result<Json<ApiResponse<PhoneNumberDto>>, ApiError<PhoneNumberDto>> {
    let Some(client_id) = request.client_id else {
        return Err(missing_owner());
    };
    let phone = state
        .phone_numbers
        .update(&number, request.into_domain(client_id))
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(phone.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/phone-numbers/{number}",
    tag = "Phone numbers",
    params(("number" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Deleted phone number", body = ApiResponse<PhoneNumberDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_phone_number(
    State(state): State<PhoneNumberHandlerState>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<PhoneNumberDto>>, ApiError<PhoneNumberDto>> {
    let phone = state.phone_numbers.delete(&number).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(phone.into())))
}
