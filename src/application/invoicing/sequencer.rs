//! Per-invoice line numbering

use std::sync::Arc;

use crate::domain::{DomainResult, InvoiceLine, RepositoryProvider};

/// Hands out the next line number of an invoice.
///
/// The number is only a proposal: two writers can read the same last line.
/// The `(invoice_id, line_number)` key rejects the loser, which then asks
/// again.
pub struct InvoiceLineSequencer {
    repos: Arc<dyn RepositoryProvider>,
}

impl InvoiceLineSequencer {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn next_line_number(&self, invoice_id: i32) -> DomainResult<i32> {
        let lines = self.repos.invoice_lines().find_by_invoice(invoice_id).await?;
        Ok(next_after(&lines))
    }
}

/// `lines` must be ordered by line number
fn next_after(lines: &[InvoiceLine]) -> i32 {
    lines.last().map_or(1, |last| last.line_number + 1)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn line(invoice_id: i32, line_number: i32) -> InvoiceLine {
        InvoiceLine {
            invoice_id,
            line_number,
            quantity: 1,
            amount_excl_tax: Decimal::ONE_HUNDRED,
            vat_rate: Decimal::ZERO,
            discount_rate: Decimal::ZERO,
        }
    }

    #[test]
    fn first_line_is_one() {
        assert_eq!(next_after(&[]), 1);
    }

    #[test]
    fn follows_last_line() {
        assert_eq!(next_after(&[line(1, 1), line(1, 2), line(1, 3)]), 4);
    }

    #[tokio::test]
    async fn numbering_is_scoped_per_invoice() {
        use crate::domain::{Client, Invoice};
        use crate::infrastructure::storage::InMemoryStore;
        use chrono::NaiveDate;

        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let client = repos
            .clients()
            .create(Client::new("M", "Petit", "Luc"), None)
            .await
            .unwrap()
            .client
            .id;
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let a = repos.invoices().insert(Invoice::new(client, date, "CB")).await.unwrap();
        let b = repos.invoices().insert(Invoice::new(client, date, "ESP")).await.unwrap();
        repos.invoice_lines().insert(line(a.id, 1)).await.unwrap();
        repos.invoice_lines().insert(line(a.id, 2)).await.unwrap();

        let sequencer = InvoiceLineSequencer::new(repos);
        assert_eq!(sequencer.next_line_number(a.id).await.unwrap(), 3);
        assert_eq!(sequencer.next_line_number(b.id).await.unwrap(), 1);
    }
}
