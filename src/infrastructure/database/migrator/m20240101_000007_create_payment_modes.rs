//! Create payment_modes table and seed the known modes

use sea_orm_migration::prelude::*;

use crate::domain::invoice::PAYMENT_MODES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentModes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentModes::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentModes::Label).string().not_null())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(PaymentModes::Table)
            .columns([PaymentModes::Code, PaymentModes::Label])
            .to_owned();
        for (code, label) in PAYMENT_MODES {
            insert.values_panic([(*code).into(), (*label).into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentModes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PaymentModes {
    Table,
    Code,
    Label,
}
