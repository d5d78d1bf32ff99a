pub mod booking;
pub mod clients;
pub mod date_range;
pub mod invoicing;
pub mod phone_numbers;

use std::sync::Arc;

use crate::domain::{DomainResult, RepositoryProvider, Room};
use crate::shared::retry::RetryConfig;

// Re-export key types for convenience
pub use booking::{AvailabilityChecker, ReservationService};
pub use clients::ClientService;
pub use date_range::DateRangeNormalizer;
pub use invoicing::{InvoiceLineSequencer, InvoiceService};
pub use phone_numbers::PhoneNumberService;

/// All application services, sharing one repository provider.
#[derive(Clone)]
pub struct AppServices {
    pub reservations: Arc<ReservationService>,
    pub invoices: Arc<InvoiceService>,
    pub clients: Arc<ClientService>,
    pub phone_numbers: Arc<PhoneNumberService>,
    repos: Arc<dyn RepositoryProvider>,
}

impl AppServices {
    pub fn new(repos: Arc<dyn RepositoryProvider>, line_retry: RetryConfig) -> Self {
        Self {
            reservations: Arc::new(ReservationService::new(repos.clone())),
            invoices: Arc::new(InvoiceService::new(repos.clone(), line_retry)),
            clients: Arc::new(ClientService::new(repos.clone())),
            phone_numbers: Arc::new(PhoneNumberService::new(repos.clone())),
            repos,
        }
    }

    /// The room catalogue, ordered by number
    pub async fn rooms(&self) -> DomainResult<Vec<Room>> {
        self.repos.rooms().list().await
    }
}
