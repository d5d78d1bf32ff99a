//! Create invoice_lines table
//!
//! `(invoice_id, line_number)` is the primary key: two writers proposing the
//! same next number cannot both succeed.

use sea_orm_migration::prelude::*;

use super::m20240101_000008_create_invoices::Invoices;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvoiceLines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InvoiceLines::InvoiceId).integer().not_null())
                    .col(ColumnDef::new(InvoiceLines::LineNumber).integer().not_null())
                    .col(
                        ColumnDef::new(InvoiceLines::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(InvoiceLines::AmountExclTax)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvoiceLines::VatRate)
                            .decimal_len(5, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(InvoiceLines::DiscountRate)
                            .decimal_len(5, 4)
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(InvoiceLines::InvoiceId)
                            .col(InvoiceLines::LineNumber),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_lines_invoice")
                            .from(InvoiceLines::Table, InvoiceLines::InvoiceId)
                            .to(Invoices::Table, Invoices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvoiceLines::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum InvoiceLines {
    Table,
    InvoiceId,
    LineNumber,
    Quantity,
    AmountExclTax,
    VatRate,
    DiscountRate,
}
