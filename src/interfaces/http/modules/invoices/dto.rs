//! Invoice DTOs
//!
//! Amounts travel as decimal strings (`"33.00"`); numeric JSON is accepted
//! on input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::invoice::to_cents;
use crate::domain::{Invoice, InvoiceLine};

/// Date range and owner for `GET /api/v1/invoices`
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListInvoicesQuery {
    /// Range start, defaults to one year before `date2`
    pub date1: Option<NaiveDate>,
    /// Range end, defaults to today
    pub date2: Option<NaiveDate>,
    pub client_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInvoiceRequest {
    /// Must be absent or 0, ids are assigned by the server
    pub id: Option<i32>,
    pub client_id: i32,
    pub invoice_date: NaiveDate,
    #[validate(length(min = 1, max = 3))]
    pub payment_mode_code: String,
}

impl From<CreateInvoiceRequest> for Invoice {
    fn from(r: CreateInvoiceRequest) -> Self {
        let mut invoice = Invoice::new(r.client_id, r.invoice_date, r.payment_mode_code);
        invoice.id = r.id.unwrap_or(0);
        invoice
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInvoiceRequest {
    /// Optional, must match the path id when present
    pub id: Option<i32>,
    pub invoice_date: NaiveDate,
    #[validate(length(min = 1, max = 3))]
    pub payment_mode_code: String,
}

impl UpdateInvoiceRequest {
    /// Client and lines are not changed by an update, so they stay unset here.
    pub fn into_domain(self) -> Invoice {
        let mut invoice = Invoice::new(0, self.invoice_date, self.payment_mode_code);
        invoice.id = self.id.unwrap_or(0);
        invoice
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InvoiceLineRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[schema(value_type = String, example = "10.00")]
    pub amount_excl_tax: Decimal,
    /// Fraction, `0.10` for 10%
    #[serde(default)]
    #[schema(value_type = String, example = "0.10")]
    pub vat_rate: Decimal,
    #[serde(default)]
    #[schema(value_type = String, example = "0")]
    pub discount_rate: Decimal,
}

impl From<InvoiceLineRequest> for InvoiceLine {
    fn from(r: InvoiceLineRequest) -> Self {
        InvoiceLine {
            invoice_id: 0,
            line_number: 0,
            quantity: r.quantity,
            amount_excl_tax: r.amount_excl_tax,
            vat_rate: r.vat_rate,
            discount_rate: r.discount_rate,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceLineDto {
    pub invoice_id: i32,
    pub line_number: i32,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub amount_excl_tax: Decimal,
    #[schema(value_type = String)]
    pub vat_rate: Decimal,
    #[schema(value_type = String)]
    pub discount_rate: Decimal,
    #[schema(value_type = String)]
    pub amount_incl_tax: Decimal,
}

impl From<InvoiceLine> for InvoiceLineDto {
    fn from(l: InvoiceLine) -> Self {
        Self {
            amount_incl_tax: to_cents(l.amount_incl_tax()),
            invoice_id: l.invoice_id,
            line_number: l.line_number,
            quantity: l.quantity,
            amount_excl_tax: l.amount_excl_tax,
            vat_rate: l.vat_rate,
            discount_rate: l.discount_rate,
        }
    }
}

/// Invoice header, with lines when they were loaded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub id: i32,
    pub client_id: i32,
    pub invoice_date: NaiveDate,
    pub payment_mode_code: String,
    pub lines: Vec<InvoiceLineDto>,
    #[schema(value_type = String)]
    pub total_incl_tax: Decimal,
}

impl From<Invoice> for InvoiceDto {
    fn from(i: Invoice) -> Self {
        let total_incl_tax = i.total_incl_tax();
        Self {
            id: i.id,
            client_id: i.client_id,
            invoice_date: i.invoice_date,
            payment_mode_code: i.payment_mode_code,
            lines: i.lines.into_iter().map(InvoiceLineDto::from).collect(),
            total_incl_tax,
        }
    }
}
