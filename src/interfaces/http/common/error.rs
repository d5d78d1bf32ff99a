//! Domain error to HTTP status mapping
//!
//! The single place where outcome categories become status codes.

use axum::http::StatusCode;
use axum::Json;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn error_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::InvalidArgument(_)
        | DomainError::RoomUnavailable { .. }
        | DomainError::UnknownRoom(_) => StatusCode::BAD_REQUEST,
        DomainError::ClientNotFound(_)
        | DomainError::ReservationNotFound { .. }
        | DomainError::InvoiceNotFound(_)
        | DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_)
        | DomainError::ConcurrencyConflict(_)
        | DomainError::ClientHasDependents(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the error response.
/// Storage failures are logged; their detail is not sent to the caller.
pub fn api_error<T>(e: DomainError) -> ApiError<T> {
    let status = error_status(&e);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %e, "Request failed");
        "Internal server error".to_string()
    } else {
        e.to_string()
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn outcome_categories_are_distinct() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            error_status(&DomainError::RoomUnavailable { room_number: 1, day }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(error_status(&DomainError::UnknownRoom(99)), StatusCode::BAD_REQUEST);
        assert_eq!(error_status(&DomainError::ClientNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            error_status(&DomainError::ReservationNotFound { room_number: 1, day }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(error_status(&DomainError::ClientHasDependents(1)), StatusCode::CONFLICT);
        assert_eq!(
            error_status(&DomainError::Storage("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_detail_is_hidden() {
        let (status, Json(body)) = api_error::<()>(DomainError::Storage("secret path".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
