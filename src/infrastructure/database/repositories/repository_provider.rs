//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    CalendarRepository, ClientRepository, InvoiceLineRepository, InvoiceRepository,
    PhoneNumberRepository, RepositoryProvider, ReservationRepository, RoomRepository,
};

use super::calendar_repository::SeaOrmCalendarRepository;
use super::client_repository::SeaOrmClientRepository;
use super::invoice_repository::{SeaOrmInvoiceLineRepository, SeaOrmInvoiceRepository};
use super::phone_number_repository::SeaOrmPhoneNumberRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let taken = repos.reservations().find(ReservationKey::new(12, day)).await?;
/// let lines = repos.invoice_lines().find_by_invoice(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    clients: SeaOrmClientRepository,
    phone_numbers: SeaOrmPhoneNumberRepository,
    rooms: SeaOrmRoomRepository,
    calendar: SeaOrmCalendarRepository,
    reservations: SeaOrmReservationRepository,
    invoices: SeaOrmInvoiceRepository,
    invoice_lines: SeaOrmInvoiceLineRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            clients: SeaOrmClientRepository::new(db.clone()),
            phone_numbers: SeaOrmPhoneNumberRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            calendar: SeaOrmCalendarRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            invoices: SeaOrmInvoiceRepository::new(db.clone()),
            invoice_lines: SeaOrmInvoiceLineRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn clients(&self) -> &dyn ClientRepository {
        &self.clients
    }

    fn phone_numbers(&self) -> &dyn PhoneNumberRepository {
        &self.phone_numbers
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn calendar(&self) -> &dyn CalendarRepository {
        &self.calendar
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        &self.invoices
    }

    fn invoice_lines(&self) -> &dyn InvoiceLineRepository {
        &self.invoice_lines
    }
}
