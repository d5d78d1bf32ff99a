//! Invoice aggregate

pub mod model;
pub mod repository;

pub use model::{to_cents, Invoice, InvoiceLine, PAYMENT_MODES};
pub use repository::{InvoiceLineRepository, InvoiceRepository};
