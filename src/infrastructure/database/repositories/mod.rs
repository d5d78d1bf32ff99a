//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod calendar_repository;
pub mod client_repository;
pub mod invoice_repository;
pub mod phone_number_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// SQLite message for foreign-key failures. `sql_err()` only recognises the
/// primary code 787, not extended codes such as 1811 (`ON DELETE RESTRICT`).
const SQLITE_FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

/// Classify a database error at the repository boundary.
///
/// Uniqueness violations are races a caller may retry or translate;
/// foreign-key violations mean a referenced row is missing or still in use.
pub(crate) fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::ConcurrencyConflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => {
            let msg = e.to_string();
            if msg.contains(SQLITE_FOREIGN_KEY_FAILED) {
                DomainError::Conflict(msg)
            } else {
                DomainError::Storage(msg)
            }
        }
    }
}
