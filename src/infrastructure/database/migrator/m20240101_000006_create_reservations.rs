//! Create reservations table
//!
//! The `(room_number, day)` primary key is what ultimately prevents double
//! booking. Clients holding reservations cannot be deleted.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_clients::Clients;
use super::m20240101_000004_create_rooms::Rooms;
use super::m20240101_000005_create_calendar_days::CalendarDays;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reservations::RoomNumber).integer().not_null())
                    .col(ColumnDef::new(Reservations::Day).date().not_null())
                    .col(ColumnDef::new(Reservations::ClientId).integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::Guests)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Reservations::ArrivalTime).time())
                    .col(
                        ColumnDef::new(Reservations::BusinessTrip)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .primary_key(
                        Index::create()
                            .col(Reservations::RoomNumber)
                            .col(Reservations::Day),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_room")
                            .from(Reservations::Table, Reservations::RoomNumber)
                            .to(Rooms::Table, Rooms::Number),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_calendar_day")
                            .from(Reservations::Table, Reservations::Day)
                            .to(CalendarDays::Table, CalendarDays::Day),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_client")
                            .from(Reservations::Table, Reservations::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_client")
                    .table(Reservations::Table)
                    .col(Reservations::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_day")
                    .table(Reservations::Table)
                    .col(Reservations::Day)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    RoomNumber,
    Day,
    ClientId,
    Guests,
    ArrivalTime,
    BusinessTrip,
}
