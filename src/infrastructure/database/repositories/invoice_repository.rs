//! SeaORM implementations of InvoiceRepository and InvoiceLineRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    DateRange, DomainError, DomainResult, Invoice, InvoiceLine, InvoiceLineRepository,
    InvoiceRepository,
};
use crate::infrastructure::database::entities::{invoice, invoice_line, payment_mode};

pub struct SeaOrmInvoiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub struct SeaOrmInvoiceLineRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceLineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: invoice::Model) -> Invoice {
    Invoice {
        id: m.id,
        client_id: m.client_id,
        invoice_date: m.invoice_date,
        payment_mode_code: m.payment_mode_code,
        lines: Vec::new(),
    }
}

fn line_to_domain(m: invoice_line::Model) -> InvoiceLine {
    InvoiceLine {
        invoice_id: m.invoice_id,
        line_number: m.line_number,
        quantity: m.quantity,
        amount_excl_tax: m.amount_excl_tax,
        vat_rate: m.vat_rate,
        discount_rate: m.discount_rate,
    }
}

// ── InvoiceRepository impl ──────────────────────────────────────

#[async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn find(&self, id: i32) -> DomainResult<Option<Invoice>> {
        let model = invoice::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_client_between(
        &self,
        client_id: i32,
        range: DateRange,
    ) -> DomainResult<Vec<Invoice>> {
        let models = invoice::Entity::find()
            .filter(invoice::Column::ClientId.eq(client_id))
            .filter(invoice::Column::InvoiceDate.between(range.start, range.end))
            .order_by_asc(invoice::Column::InvoiceDate)
            .order_by_asc(invoice::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool> {
        let count = invoice::Entity::find()
            .filter(invoice::Column::ClientId.eq(client_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, i: Invoice) -> DomainResult<Invoice> {
        debug!("Saving invoice for client {}", i.client_id);

        let model = invoice::ActiveModel {
            id: NotSet,
            client_id: Set(i.client_id),
            invoice_date: Set(i.invoice_date),
            payment_mode_code: Set(i.payment_mode_code),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, i: Invoice) -> DomainResult<()> {
        debug!("Updating invoice: {}", i.id);

        let Some(existing) = invoice::Entity::find_by_id(i.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Err(DomainError::InvoiceNotFound(i.id));
        };

        let mut active: invoice::ActiveModel = existing.into();
        active.invoice_date = Set(i.invoice_date);
        active.payment_mode_code = Set(i.payment_mode_code);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn payment_mode_exists(&self, code: &str) -> DomainResult<bool> {
        let model = payment_mode::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.is_some())
    }
}

// ── InvoiceLineRepository impl ──────────────────────────────────

#[async_trait]
impl InvoiceLineRepository for SeaOrmInvoiceLineRepository {
    async fn find_by_invoice(&self, invoice_id: i32) -> DomainResult<Vec<InvoiceLine>> {
        let models = invoice_line::Entity::find()
            .filter(invoice_line::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(invoice_line::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(line_to_domain).collect())
    }

    async fn insert(&self, l: InvoiceLine) -> DomainResult<()> {
        debug!("Saving line {} of invoice {}", l.line_number, l.invoice_id);

        let model = invoice_line::ActiveModel {
            invoice_id: Set(l.invoice_id),
            line_number: Set(l.line_number),
            quantity: Set(l.quantity),
            amount_excl_tax: Set(l.amount_excl_tax),
            vat_rate: Set(l.vat_rate),
            discount_rate: Set(l.discount_rate),
        };
        invoice_line::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
