//! Reservation aggregate
//!
//! Contains the Reservation entity, its natural key, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationDraft, ReservationKey};
pub use repository::ReservationRepository;
