//! Invoicing: invoice headers and sequentially numbered lines

pub mod sequencer;
pub mod service;

pub use sequencer::InvoiceLineSequencer;
pub use service::InvoiceService;
