//! Reservation DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Reservation, ReservationDraft};

/// Reservation payload for book, update and cancel.
///
/// `room_number` and `day` identify the reservation. `client_id` in the body
/// is ignored: the owner always comes from the `client_id` query parameter.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReservationRequest {
    pub room_number: Option<i32>,
    /// ISO date, e.g. `2024-03-01`
    pub day: Option<NaiveDate>,
    pub client_id: Option<i32>,
    /// Defaults to 1 when booking; left unchanged on update when absent
    pub guests: Option<i32>,
    /// Expected arrival, e.g. `18:30:00`
    pub arrival_time: Option<NaiveTime>,
    #[serde(default)]
    pub business_trip: bool,
}

impl From<ReservationRequest> for ReservationDraft {
    fn from(r: ReservationRequest) -> Self {
        ReservationDraft {
            room_number: r.room_number,
            day: r.day,
            client_id: r.client_id,
            guests: r.guests,
            arrival_time: r.arrival_time,
            business_trip: r.business_trip,
        }
    }
}

/// Owner of the reservation being booked, updated or cancelled
#[derive(Debug, Deserialize, IntoParams)]
pub struct ClientQuery {
    pub client_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DayQuery {
    /// ISO date
    pub day: Option<NaiveDate>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub room_number: i32,
    pub day: NaiveDate,
    pub client_id: i32,
    pub guests: i32,
    pub arrival_time: Option<NaiveTime>,
    pub business_trip: bool,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            room_number: r.room_number,
            day: r.day,
            client_id: r.client_id,
            guests: r.guests,
            arrival_time: r.arrival_time,
            business_trip: r.business_trip,
        }
    }
}
