//! Reservation domain entity

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{DomainError, DomainResult};

/// Natural key of a reservation: one room on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservationKey {
    pub room_number: i32,
    pub day: NaiveDate,
}

impl ReservationKey {
    pub fn new(room_number: i32, day: NaiveDate) -> Self {
        Self { room_number, day }
    }
}

impl std::fmt::Display for ReservationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room {} on {}", self.room_number, self.day)
    }
}

/// Booking of one room for one day by one client
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub room_number: i32,
    pub day: NaiveDate,
    /// Owner. Immutable once booked.
    pub client_id: i32,
    pub guests: i32,
    pub arrival_time: Option<NaiveTime>,
    pub business_trip: bool,
}

impl Reservation {
    pub fn key(&self) -> ReservationKey {
        ReservationKey::new(self.room_number, self.day)
    }

    /// Copy the mutable attributes from `changes`.
    /// Room, day and owner are left untouched, as is the guest count when
    /// `changes` does not carry one.
    pub fn apply_changes(&mut self, changes: &ReservationDraft) {
        if let Some(guests) = changes.guests {
            self.guests = guests;
        }
        self.arrival_time = changes.arrival_time;
        self.business_trip = changes.business_trip;
    }
}

/// Caller-supplied reservation data, before validation.
///
/// Room and day are optional so that a missing key is reported as
/// `InvalidArgument` instead of silently defaulting.
#[derive(Debug, Clone, Default)]
pub struct ReservationDraft {
    pub room_number: Option<i32>,
    pub day: Option<NaiveDate>,
    /// Ignored: the owner always comes from the request route.
    pub client_id: Option<i32>,
    /// Absent: 1 when booking, unchanged when updating
    pub guests: Option<i32>,
    pub arrival_time: Option<NaiveTime>,
    pub business_trip: bool,
}

impl ReservationDraft {
    pub fn new(room_number: i32, day: NaiveDate, guests: i32) -> Self {
        Self {
            room_number: Some(room_number),
            day: Some(day),
            guests: Some(guests),
            ..Default::default()
        }
    }

    /// Validated `(room, day)` key
    pub fn key(&self) -> DomainResult<ReservationKey> {
        let room_number = match self.room_number {
            Some(n) if n > 0 => n,
            _ => {
                return Err(DomainError::InvalidArgument(
                    "room_number is required and must be positive".into(),
                ))
            }
        };
        let day = self
            .day
            .ok_or_else(|| DomainError::InvalidArgument("day is required".into()))?;
        Ok(ReservationKey::new(room_number, day))
    }

    /// A supplied guest count must be at least 1
    pub fn check_guests(&self) -> DomainResult<()> {
        match self.guests {
            Some(n) if n < 1 => Err(DomainError::InvalidArgument(
                "guests must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Build the reservation owned by `client_id`, whatever the draft claims.
    pub fn into_reservation(self, client_id: i32) -> DomainResult<Reservation> {
        let key = self.key()?;
        self.check_guests()?;
        Ok(Reservation {
            room_number: key.room_number,
            day: key.day,
            client_id,
            guests: self.guests.unwrap_or(1),
            arrival_time: self.arrival_time,
            business_trip: self.business_trip,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn draft_owner_is_overridden() {
        let draft = ReservationDraft {
            client_id: Some(99),
            ..ReservationDraft::new(12, day(), 2)
        };
        let r = draft.into_reservation(3).unwrap();
        assert_eq!(r.client_id, 3);
        assert_eq!(r.key(), ReservationKey::new(12, day()));
    }

    #[test]
    fn missing_day_is_invalid() {
        let draft = ReservationDraft {
            room_number: Some(12),
            guests: Some(1),
            ..Default::default()
        };
        assert!(matches!(draft.key(), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn zero_room_is_invalid() {
        let draft = ReservationDraft::new(0, day(), 1);
        assert!(matches!(draft.key(), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn zero_guests_is_invalid() {
        let draft = ReservationDraft::new(12, day(), 0);
        assert!(matches!(
            draft.into_reservation(3),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn apply_changes_keeps_key_and_owner() {
        let mut r = ReservationDraft::new(12, day(), 1)
            .into_reservation(3)
            .unwrap();
        let changes = ReservationDraft {
            room_number: Some(14),
            client_id: Some(8),
            guests: Some(3),
            arrival_time: NaiveTime::from_hms_opt(18, 30, 0),
            business_trip: true,
            ..Default::default()
        };
        r.apply_changes(&changes);
        assert_eq!(r.room_number, 12);
        assert_eq!(r.client_id, 3);
        assert_eq!(r.guests, 3);
        assert!(r.business_trip);
        assert_eq!(r.arrival_time, NaiveTime::from_hms_opt(18, 30, 0));
    }

    #[test]
    fn absent_guests_default_to_one_and_keep_stored_count() {
        let draft = ReservationDraft {
            guests: None,
            ..ReservationDraft::new(12, day(), 1)
        };
        let mut r = draft.clone().into_reservation(3).unwrap();
        assert_eq!(r.guests, 1);

        r.guests = 4;
        r.apply_changes(&ReservationDraft {
            business_trip: true,
            ..draft
        });
        assert_eq!(r.guests, 4);
        assert!(r.business_trip);
    }

    #[test]
    fn key_display() {
        assert_eq!(
            ReservationKey::new(12, day()).to_string(),
            "room 12 on 2024-03-01"
        );
    }
}
