//! Room availability checks
//!
//! "Room does not exist" and "room is taken" are separate outcomes and are
//! answered by separate lookups.

use std::sync::Arc;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, ReservationKey};

pub struct AvailabilityChecker {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityChecker {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Whether a reservation already exists for this exact room/day pair
    pub async fn is_room_booked(&self, key: ReservationKey) -> DomainResult<bool> {
        Ok(self.repos.reservations().find(key).await?.is_some())
    }

    /// Fails with `UnknownRoom` when no room carries this number
    pub async fn ensure_room_exists(&self, room_number: i32) -> DomainResult<()> {
        if self.repos.rooms().exists(room_number).await? {
            Ok(())
        } else {
            Err(DomainError::UnknownRoom(room_number))
        }
    }

    /// Fails with `RoomUnavailable` when the room/day pair is already booked
    pub async fn ensure_available(&self, key: ReservationKey) -> DomainResult<()> {
        if self.is_room_booked(key).await? {
            Err(DomainError::RoomUnavailable {
                room_number: key.room_number,
                day: key.day,
            })
        } else {
            Ok(())
        }
    }
}
