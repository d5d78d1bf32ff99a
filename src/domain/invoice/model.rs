//! Invoice (facture) domain entities

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Known payment modes, seeded into every store: (code, label)
pub const PAYMENT_MODES: &[(&str, &str)] = &[
    ("CB", "Carte bancaire"),
    ("CHQ", "Chèque"),
    ("ESP", "Espèces"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// Server-assigned, auto-incrementing (0 until stored)
    pub id: i32,
    pub client_id: i32,
    pub invoice_date: NaiveDate,
    pub payment_mode_code: String,
    /// Ordered by line number. Empty when only the header was loaded.
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn new(client_id: i32, invoice_date: NaiveDate, payment_mode_code: impl Into<String>) -> Self {
        Self {
            id: 0,
            client_id,
            invoice_date,
            payment_mode_code: payment_mode_code.into(),
            lines: Vec::new(),
        }
    }

    /// Sum of line amounts, in cents (always two decimal places)
    pub fn total_incl_tax(&self) -> Decimal {
        to_cents(self.lines.iter().map(InvoiceLine::amount_incl_tax).sum())
    }
}

/// Invoice line, keyed by `(invoice_id, line_number)`
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub invoice_id: i32,
    /// 1-based, contiguous within one invoice
    pub line_number: i32,
    pub quantity: i32,
    /// Unit amount before tax
    pub amount_excl_tax: Decimal,
    /// VAT rate as a fraction (0.10 = 10%)
    pub vat_rate: Decimal,
    /// Discount rate as a fraction
    pub discount_rate: Decimal,
}

impl InvoiceLine {
    pub fn amount_incl_tax(&self) -> Decimal {
        Decimal::from(self.quantity)
            * self.amount_excl_tax
            * (Decimal::ONE - self.discount_rate)
            * (Decimal::ONE + self.vat_rate)
    }
}

/// Round to cents and fix the scale at two places, so `33` renders as `33.00`
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.round_dp(2);
    cents.rescale(2);
    cents
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(n: i32, qty: i32, amount: &str, vat: &str, discount: &str) -> InvoiceLine {
        InvoiceLine {
            invoice_id: 1,
            line_number: n,
            quantity: qty,
            amount_excl_tax: dec(amount),
            vat_rate: dec(vat),
            discount_rate: dec(discount),
        }
    }

    #[test]
    fn line_amount_applies_discount_then_vat() {
        let l = line(1, 2, "50.00", "0.10", "0.20");
        // 2 * 50 * 0.8 * 1.1
        assert_eq!(l.amount_incl_tax(), dec("88"));
    }

    #[test]
    fn empty_invoice_totals_zero() {
        let invoice = Invoice::new(9, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "CB");
        assert_eq!(invoice.total_incl_tax(), Decimal::ZERO);
    }

    #[test]
    fn total_is_rounded_to_cents() {
        let mut invoice = Invoice::new(9, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "CB");
        invoice.lines.push(line(1, 1, "10.005", "0", "0"));
        invoice.lines.push(line(2, 1, "1.00", "0.055", "0"));
        assert_eq!(invoice.total_incl_tax(), dec("11.06"));
    }

    #[test]
    fn total_always_has_two_decimal_places() {
        let mut invoice = Invoice::new(9, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "CB");
        invoice.lines.push(line(1, 3, "11", "0", "0"));
        assert_eq!(invoice.total_incl_tax().to_string(), "33.00");
    }
}
