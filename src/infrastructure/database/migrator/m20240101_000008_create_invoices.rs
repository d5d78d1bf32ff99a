//! Create invoices table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_clients::Clients;
use super::m20240101_000007_create_payment_modes::PaymentModes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::ClientId).integer().not_null())
                    .col(ColumnDef::new(Invoices::InvoiceDate).date().not_null())
                    .col(ColumnDef::new(Invoices::PaymentModeCode).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_client")
                            .from(Invoices::Table, Invoices::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_payment_mode")
                            .from(Invoices::Table, Invoices::PaymentModeCode)
                            .to(PaymentModes::Table, PaymentModes::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_client_date")
                    .table(Invoices::Table)
                    .col(Invoices::ClientId)
                    .col(Invoices::InvoiceDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Invoices {
    Table,
    Id,
    ClientId,
    InvoiceDate,
    PaymentModeCode,
}
