use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Client {0} is not registered")]
    ClientNotFound(i32),

    #[error("No reservation for room {room_number} on {day}")]
    ReservationNotFound { room_number: i32, day: NaiveDate },

    #[error("Room {room_number} is not available on {day}")]
    RoomUnavailable { room_number: i32, day: NaiveDate },

    #[error("There is no room numbered {0}")]
    UnknownRoom(i32),

    #[error("Invoice {0} not found")]
    InvoiceNotFound(i32),

    #[error("Client {0} has invoices or reservations and cannot be deleted")]
    ClientHasDependents(i32),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Concurrent write conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether the operation may succeed if recomputed and retried.
    ///
    /// Only uniqueness races surfaced at write time qualify; storage failures
    /// are fatal to the request.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::ConcurrencyConflict(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
