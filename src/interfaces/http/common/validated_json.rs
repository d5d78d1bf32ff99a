//! Request body extractor for hotel resources
//!
//! `ValidatedJson<T>` reads the body like `axum::Json<T>` and then applies
//! the field rules declared on `T` with `validator`.
//! A body that cannot be read as `T` is a 400; a body that reads but
//! breaks a field rule is a 422 listing the offending fields.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// JSON body that passed its field rules.
///
/// ```ignore
/// use crate::interfaces::http::modules::clients::AddPhoneRequest;
///
/// async fn add_phone(
///     Path(id): Path<i32>,
///     ValidatedJson(body): ValidatedJson<AddPhoneRequest>,
/// ) -> impl IntoResponse {
///     // `body.number` is 1 to 20 characters long here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Why a request body was refused.
pub enum ValidatedJsonRejection {
    /// Not JSON, or not shaped like the target DTO
    Unreadable(JsonRejection),
    /// Shaped correctly but a field rule failed
    Invalid(ValidationErrors),
}

/// `field: message` for every failed rule, fields in name order
fn field_messages(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => format!("{}: {}", field, m),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unreadable(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, field_messages(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Unreadable)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
