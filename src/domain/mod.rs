pub mod calendar;
pub mod client;
pub mod invoice;
pub mod phone_number;
pub mod repositories;
pub mod reservation;
pub mod room;

// Re-export commonly used types
pub use calendar::{CalendarRepository, DateRange};
pub use client::{Address, Client, ClientDetails, ClientRepository};
pub use invoice::{Invoice, InvoiceLine, InvoiceLineRepository, InvoiceRepository};
pub use phone_number::{PhoneKind, PhoneNumber, PhoneNumberRepository};
pub use repositories::RepositoryProvider;
pub use reservation::{Reservation, ReservationDraft, ReservationKey, ReservationRepository};
pub use room::{Room, RoomRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
