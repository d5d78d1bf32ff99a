//! Invoice and invoice line repository interfaces

use async_trait::async_trait;

use super::model::{Invoice, InvoiceLine};
use crate::domain::{DateRange, DomainResult};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Invoice header (lines not loaded)
    async fn find(&self, id: i32) -> DomainResult<Option<Invoice>>;

    /// Headers of a client's invoices dated within `range` (inclusive),
    /// ordered by date then id
    async fn find_for_client_between(
        &self,
        client_id: i32,
        range: DateRange,
    ) -> DomainResult<Vec<Invoice>>;

    /// Whether the client has at least one invoice
    async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool>;

    /// Store a new invoice header; returns it with its assigned id
    async fn insert(&self, invoice: Invoice) -> DomainResult<Invoice>;

    /// Persist date and payment mode of an existing invoice
    async fn update(&self, invoice: Invoice) -> DomainResult<()>;

    async fn payment_mode_exists(&self, code: &str) -> DomainResult<bool>;
}

#[async_trait]
pub trait InvoiceLineRepository: Send + Sync {
    /// Lines of one invoice, ordered by line number
    async fn find_by_invoice(&self, invoice_id: i32) -> DomainResult<Vec<InvoiceLine>>;

    /// Insert a line. A taken `(invoice_id, line_number)` surfaces as
    /// `ConcurrencyConflict`.
    async fn insert(&self, line: InvoiceLine) -> DomainResult<()>;
}
