//! Invoice use-cases

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::sequencer::InvoiceLineSequencer;
use crate::application::date_range::DateRangeNormalizer;
use crate::domain::{DomainError, DomainResult, Invoice, InvoiceLine, RepositoryProvider};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

pub struct InvoiceService {
    repos: Arc<dyn RepositoryProvider>,
    sequencer: InvoiceLineSequencer,
    line_retry: RetryConfig,
}

impl InvoiceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, line_retry: RetryConfig) -> Self {
        let sequencer = InvoiceLineSequencer::new(repos.clone());
        Self {
            repos,
            sequencer,
            line_retry,
        }
    }

    /// Invoice headers of a client dated within the normalized range
    pub async fn list_for_client(
        &self,
        date1: Option<NaiveDate>,
        date2: Option<NaiveDate>,
        client_id: Option<i32>,
    ) -> DomainResult<Vec<Invoice>> {
        let range = DateRangeNormalizer::normalize(date1, date2)?;
        let client_id = match client_id {
            Some(id) if id > 0 => id,
            _ => {
                return Err(DomainError::InvalidArgument(
                    "client_id is required and must be positive".into(),
                ))
            }
        };
        debug!(client_id, start = %range.start, end = %range.end, "Listing invoices");
        self.repos.invoices().find_for_client_between(client_id, range).await
    }

    /// Invoice with its lines loaded
    pub async fn get(&self, id: i32) -> DomainResult<Invoice> {
        let mut invoice = self.find(id).await?;
        invoice.lines = self.repos.invoice_lines().find_by_invoice(id).await?;
        Ok(invoice)
    }

    pub async fn create(&self, invoice: Invoice) -> DomainResult<Invoice> {
        if invoice.id > 0 {
            return Err(DomainError::InvalidArgument(
                "invoice id is assigned by the server".into(),
            ));
        }
        if !self.repos.clients().exists(invoice.client_id).await? {
            return Err(DomainError::ClientNotFound(invoice.client_id));
        }
        self.ensure_payment_mode(&invoice.payment_mode_code).await?;

        let stored = self
            .repos
            .invoices()
            .insert(Invoice {
                lines: Vec::new(),
                ..invoice
            })
            .await?;

        info!(invoice_id = stored.id, client_id = stored.client_id, "Invoice created");
        Ok(stored)
    }

    /// Change date and payment mode. Client and lines are left untouched.
    pub async fn update(&self, id: i32, changes: Invoice) -> DomainResult<Invoice> {
        if changes.id > 0 && changes.id != id {
            return Err(DomainError::InvalidArgument(format!(
                "body id {} does not match invoice {}",
                changes.id, id
            )));
        }
        let mut invoice = self.find(id).await?;
        self.ensure_payment_mode(&changes.payment_mode_code).await?;

        invoice.invoice_date = changes.invoice_date;
        invoice.payment_mode_code = changes.payment_mode_code;
        self.repos.invoices().update(invoice.clone()).await?;

        info!(invoice_id = id, "Invoice updated");
        self.get(id).await
    }

    /// Append a line, numbered after the invoice's current last line.
    ///
    /// A concurrent writer taking the same number makes the insert fail with
    /// `ConcurrencyConflict`; the number is then recomputed and the insert
    /// retried with backoff.
    pub async fn add_line(&self, id: i32, line: InvoiceLine) -> DomainResult<InvoiceLine> {
        self.find(id).await?;
        if line.quantity < 1 {
            return Err(DomainError::InvalidArgument("quantity must be at least 1".into()));
        }

        let stored = retry_with_backoff(
            self.line_retry.clone(),
            || self.insert_next_line(id, line.clone()),
            DomainError::is_transient,
            "add_invoice_line",
        )
        .await?;

        info!(invoice_id = id, line_number = stored.line_number, "Invoice line added");
        Ok(stored)
    }

    async fn insert_next_line(&self, invoice_id: i32, mut line: InvoiceLine) -> DomainResult<InvoiceLine> {
        line.invoice_id = invoice_id;
        line.line_number = self.sequencer.next_line_number(invoice_id).await?;
        match self.repos.invoice_lines().insert(line.clone()).await {
            Ok(()) => Ok(line),
            Err(e) => {
                if e.is_transient() {
                    metrics::counter!("invoice_line_retries_total").increment(1);
                }
                Err(e)
            }
        }
    }

    async fn find(&self, id: i32) -> DomainResult<Invoice> {
        self.repos
            .invoices()
            .find(id)
            .await?
            .ok_or(DomainError::InvoiceNotFound(id))
    }

    async fn ensure_payment_mode(&self, code: &str) -> DomainResult<()> {
        if self.repos.invoices().payment_mode_exists(code).await? {
            Ok(())
        } else {
            Err(DomainError::InvalidArgument(format!("unknown payment mode '{}'", code)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{
        CalendarRepository, Client, ClientRepository, InvoiceLineRepository, InvoiceRepository,
        PhoneNumberRepository, ReservationRepository, RoomRepository,
    };
    use crate::infrastructure::storage::InMemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(quantity: i32, amount: &str) -> InvoiceLine {
        InvoiceLine {
            invoice_id: 0,
            line_number: 0,
            quantity,
            amount_excl_tax: dec(amount),
            vat_rate: dec("0.10"),
            discount_rate: Decimal::ZERO,
        }
    }

    /// Store whose line inserts lose a race against a phantom writer that
    /// grabs the proposed number first, `races` times.
    struct RacingStore {
        inner: Arc<InMemoryStore>,
        lines: RacingLines,
    }

    struct RacingLines {
        inner: Arc<InMemoryStore>,
        races: AtomicU32,
    }

    #[async_trait]
    impl InvoiceLineRepository for RacingLines {
        async fn find_by_invoice(&self, invoice_id: i32) -> DomainResult<Vec<InvoiceLine>> {
            self.inner.invoice_lines().find_by_invoice(invoice_id).await
        }

        async fn insert(&self, line: InvoiceLine) -> DomainResult<()> {
            let lines = self.inner.invoice_lines();
            if self
                .races
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                lines.insert(line.clone()).await?;
            }
            lines.insert(line).await
        }
    }

    impl RepositoryProvider for RacingStore {
        fn clients(&self) -> &dyn ClientRepository {
            self.inner.clients()
        }
        fn phone_numbers(&self) -> &dyn PhoneNumberRepository {
            self.inner.phone_numbers()
        }
        fn rooms(&self) -> &dyn RoomRepository {
            self.inner.rooms()
        }
        fn calendar(&self) -> &dyn CalendarRepository {
            self.inner.calendar()
        }
        fn reservations(&self) -> &dyn ReservationRepository {
            self.inner.reservations()
        }
        fn invoices(&self) -> &dyn InvoiceRepository {
            self.inner.invoices()
        }
        fn invoice_lines(&self) -> &dyn InvoiceLineRepository {
            &self.lines
        }
    }

    async fn client(repos: &Arc<dyn RepositoryProvider>) -> i32 {
        repos
            .clients()
            .create(Client::new("Mme", "Leroy", "Anne"), None)
            .await
            .unwrap()
            .client
            .id
    }

    fn service(repos: Arc<dyn RepositoryProvider>) -> InvoiceService {
        InvoiceService::new(repos, RetryConfig::default())
    }

    #[tokio::test]
    async fn create_rejects_caller_supplied_id() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client_id = client(&repos).await;
        let mut invoice = Invoice::new(client_id, d(2024, 1, 5), "CB");
        invoice.id = 42;

        assert!(matches!(
            service(repos).create(invoice).await,
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn create_checks_client_and_payment_mode() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client_id = client(&repos).await;
        let svc = service(repos);

        assert!(matches!(
            svc.create(Invoice::new(9999, d(2024, 1, 5), "CB")).await,
            Err(DomainError::ClientNotFound(9999))
        ));
        assert!(matches!(
            svc.create(Invoice::new(client_id, d(2024, 1, 5), "BTC")).await,
            Err(DomainError::InvalidArgument(_))
        ));

        let created = svc.create(Invoice::new(client_id, d(2024, 1, 5), "CHQ")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(svc.get(created.id).await.unwrap().payment_mode_code, "CHQ");
    }

    #[tokio::test]
    async fn list_for_client_filters_by_normalized_range() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client_id = client(&repos).await;
        let other = client(&repos).await;
        let svc = service(repos);
        for date in [d(2022, 12, 31), d(2023, 1, 1), d(2023, 6, 1), d(2024, 1, 1), d(2024, 1, 2)] {
            svc.create(Invoice::new(client_id, date, "CB")).await.unwrap();
        }
        svc.create(Invoice::new(other, d(2023, 6, 1), "CB")).await.unwrap();

        let dates: Vec<NaiveDate> = svc
            .list_for_client(None, Some(d(2024, 1, 1)), Some(client_id))
            .await
            .unwrap()
            .iter()
            .map(|i| i.invoice_date)
            .collect();
        assert_eq!(dates, vec![d(2023, 1, 1), d(2023, 6, 1), d(2024, 1, 1)]);

        let swapped = svc
            .list_for_client(Some(d(2023, 7, 1)), Some(d(2023, 5, 1)), Some(client_id))
            .await
            .unwrap();
        assert_eq!(swapped.len(), 1);

        assert!(svc
            .list_for_client(Some(d(2010, 1, 1)), Some(d(2010, 2, 1)), Some(client_id))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn list_for_client_requires_dates_and_client() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let svc = service(repos);
        assert!(matches!(
            svc.list_for_client(None, None, Some(1)).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.list_for_client(Some(d(2024, 1, 1)), None, None).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.list_for_client(Some(d(2024, 1, 1)), None, Some(0)).await,
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn update_changes_date_and_payment_mode() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client_id = client(&repos).await;
        let svc = service(repos);
        let created = svc.create(Invoice::new(client_id, d(2024, 1, 5), "CB")).await.unwrap();

        let changes = Invoice::new(client_id, d(2024, 2, 1), "ESP");
        let updated = svc.update(created.id, changes).await.unwrap();
        assert_eq!(updated.invoice_date, d(2024, 2, 1));
        assert_eq!(updated.payment_mode_code, "ESP");

        let mut mismatched = Invoice::new(client_id, d(2024, 2, 1), "ESP");
        mismatched.id = created.id + 1;
        assert!(matches!(
            svc.update(created.id, mismatched).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.update(created.id + 100, Invoice::new(client_id, d(2024, 2, 1), "ESP")).await,
            Err(DomainError::InvoiceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn lines_are_numbered_sequentially() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client_id = client(&repos).await;
        let svc = service(repos);
        let invoice = svc.create(Invoice::new(client_id, d(2024, 1, 5), "CB")).await.unwrap();

        for expected in 1..=3 {
            let stored = svc.add_line(invoice.id, line(1, "10.00")).await.unwrap();
            assert_eq!(stored.line_number, expected);
            assert_eq!(stored.invoice_id, invoice.id);
        }

        let loaded = svc.get(invoice.id).await.unwrap();
        let numbers: Vec<i32> = loaded.lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(loaded.total_incl_tax(), dec("33.00"));
    }

    #[tokio::test]
    async fn add_line_rejects_bad_input() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client_id = client(&repos).await;
        let svc = service(repos);
        let invoice = svc.create(Invoice::new(client_id, d(2024, 1, 5), "CB")).await.unwrap();

        assert!(matches!(
            svc.add_line(invoice.id + 1, line(1, "10")).await,
            Err(DomainError::InvoiceNotFound(_))
        ));
        assert!(matches!(
            svc.add_line(invoice.id, line(0, "10")).await,
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn add_line_retries_after_losing_a_race() {
        let inner = Arc::new(InMemoryStore::new());
        let repos: Arc<dyn RepositoryProvider> = Arc::new(RacingStore {
            inner: inner.clone(),
            lines: RacingLines {
                inner: inner.clone(),
                races: AtomicU32::new(1),
            },
        });
        let client_id = client(&repos).await;
        let svc = service(repos);
        let invoice = svc.create(Invoice::new(client_id, d(2024, 1, 5), "CB")).await.unwrap();

        let stored = svc.add_line(invoice.id, line(2, "50.00")).await.unwrap();
        assert_eq!(stored.line_number, 2);

        let numbers: Vec<i32> = svc
            .get(invoice.id)
            .await
            .unwrap()
            .lines
            .iter()
            .map(|l| l.line_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn add_line_gives_up_after_configured_attempts() {
        let inner = Arc::new(InMemoryStore::new());
        let repos: Arc<dyn RepositoryProvider> = Arc::new(RacingStore {
            inner: inner.clone(),
            lines: RacingLines {
                inner: inner.clone(),
                races: AtomicU32::new(5),
            },
        });
        let client_id = client(&repos).await;
        let svc = InvoiceService::new(repos, RetryConfig::with_attempts(2));
        let invoice = svc.create(Invoice::new(client_id, d(2024, 1, 5), "CB")).await.unwrap();

        assert!(matches!(
            svc.add_line(invoice.id, line(1, "10")).await,
            Err(DomainError::ConcurrencyConflict(_))
        ));
    }
}
