//! Shared pieces of the HTTP layer: response envelope, error mapping,
//! validated JSON extraction

pub mod error;
pub mod response;
pub mod validated_json;

pub use error::{api_error, error_status, ApiError};
pub use response::ApiResponse;
pub use validated_json::ValidatedJson;
