//! Invoice HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::InvoiceService;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct InvoiceHandlerState {
    pub invoices: Arc<InvoiceService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    tag = "Invoices",
    params(ListInvoicesQuery),
    responses(
        (status = 200, description = "Invoice headers in the date range", body = ApiResponse<Vec<InvoiceDto>>),
        (status = 400, description = "Missing client_id or inverted range")
    )
)]
pub async fn list_invoices(
    State(state): State<InvoiceHandlerState>,
    Query(query): Query<ListInvoicesQuery>,
) -> Result<Json<ApiResponse<Vec<InvoiceDto>>>, ApiError<Vec<InvoiceDto>>> {
    let invoices = state
        .invoices
        .list_for_client(query.date1, query.date2, query.client_id)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        invoices.into_iter().map(InvoiceDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    tag = "Invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = ApiResponse<InvoiceDto>),
        (status = 400, description = "Id supplied or unknown payment mode"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn create_invoice(
    State(state): State<InvoiceHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvoiceDto>>), ApiError<InvoiceDto>> {
    let invoice = state
        .invoices
        .create(request.into())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(invoice.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    tag = "Invoices",
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice with lines", body = ApiResponse<InvoiceDto>),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    State(state): State<InvoiceHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<InvoiceDto>>, ApiError<InvoiceDto>> {
    let invoice = state.invoices.get(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(invoice.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/invoices/{id}",
    tag = "Invoices",
    params(("id" = i32, Path, description = "Invoice ID")),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice updated", body = ApiResponse<InvoiceDto>),
        (status = 400, description = "Id mismatch or unknown payment mode"),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn update_invoice(
    State(state): State<InvoiceHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateInvoiceRequest>,
) -> Result<Json<ApiResponse<InvoiceDto>>, ApiError<InvoiceDto>> {
    let invoice = state
        .invoices
        .update(id, request.into_domain())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(invoice.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/invoices/{id}",
    tag = "Invoices",
    params(("id" = i32, Path, description = "Invoice ID")),
    request_body = InvoiceLineRequest,
    responses(
        (status = 201, description = "Line appended", body = ApiResponse<InvoiceLineDto>),
        (status = 404, description = "Invoice not found"),
        (status = 409, description = "Line numbering contention persisted")
    )
)]
pub async fn add_invoice_line(
    State(state): State<InvoiceHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<InvoiceLineRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvoiceLineDto>>), ApiError<InvoiceLineDto>> {
    let line = state
        .invoices
        .add_line(id, request.into())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(line.into()))))
}
