//! Create rooms table and seed the room catalogue

use sea_orm_migration::prelude::*;

use crate::domain::Room;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Number)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Floor).integer().not_null())
                    .col(ColumnDef::new(Rooms::Bath).boolean().not_null())
                    .col(ColumnDef::new(Rooms::Shower).boolean().not_null())
                    .col(ColumnDef::new(Rooms::Toilet).boolean().not_null())
                    .col(ColumnDef::new(Rooms::Beds).integer().not_null())
                    .col(ColumnDef::new(Rooms::PhoneExtension).integer().not_null())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(Rooms::Table)
            .columns([
                Rooms::Number,
                Rooms::Floor,
                Rooms::Bath,
                Rooms::Shower,
                Rooms::Toilet,
                Rooms::Beds,
                Rooms::PhoneExtension,
            ])
            .to_owned();
        for room in Room::catalogue() {
            insert.values_panic([
                room.number.into(),
                room.floor.into(),
                room.bath.into(),
                room.shower.into(),
                room.toilet.into(),
                room.beds.into(),
                room.phone_extension.into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rooms {
    Table,
    Number,
    Floor,
    Bath,
    Shower,
    Toilet,
    Beds,
    PhoneExtension,
}
