//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Reservation, ReservationKey};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find the reservation for an exact room/day pair
    async fn find(&self, key: ReservationKey) -> DomainResult<Option<Reservation>>;

    /// All reservations for a day, ordered by room
    async fn find_by_day(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>>;

    /// All reservations of a client, ordered by day then room
    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Whether the client holds at least one reservation
    async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool>;

    /// Insert a new reservation.
    ///
    /// The room/day uniqueness constraint is the final arbiter: a taken
    /// key surfaces as `ConcurrencyConflict`.
    async fn insert(&self, reservation: Reservation) -> DomainResult<()>;

    /// Persist the mutable attributes of an existing reservation
    async fn update(&self, reservation: Reservation) -> DomainResult<()>;

    async fn delete(&self, key: ReservationKey) -> DomainResult<()>;
}
