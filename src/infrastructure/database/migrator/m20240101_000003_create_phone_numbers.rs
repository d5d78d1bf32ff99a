//! Create phone_numbers table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_clients::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhoneNumbers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PhoneNumbers::Number)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PhoneNumbers::ClientId).integer().not_null())
                    .col(
                        ColumnDef::new(PhoneNumbers::Kind)
                            .string_len(1)
                            .not_null()
                            .default("M"),
                    )
                    .col(
                        ColumnDef::new(PhoneNumbers::Professional)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phone_numbers_client")
                            .from(PhoneNumbers::Table, PhoneNumbers::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_phone_numbers_client")
                    .table(PhoneNumbers::Table)
                    .col(PhoneNumbers::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhoneNumbers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PhoneNumbers {
    Table,
    Number,
    ClientId,
    Kind,
    Professional,
}
