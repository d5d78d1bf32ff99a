//! Repository provider for the domain layer
//!
//! Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
//!     let booked = repos.reservations().find(key).await?.is_some();
//!     let known = repos.rooms().exists(key.room_number).await?;
//!     Ok(())
//! }
//! ```

use super::calendar::CalendarRepository;
use super::client::ClientRepository;
use super::invoice::{InvoiceLineRepository, InvoiceRepository};
use super::phone_number::PhoneNumberRepository;
use super::reservation::ReservationRepository;
use super::room::RoomRepository;

/// Provides access to all domain repositories.
pub trait RepositoryProvider: Send + Sync {
    fn clients(&self) -> &dyn ClientRepository;
    fn phone_numbers(&self) -> &dyn PhoneNumberRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn calendar(&self) -> &dyn CalendarRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn invoices(&self) -> &dyn InvoiceRepository;
    fn invoice_lines(&self) -> &dyn InvoiceLineRepository;
}
