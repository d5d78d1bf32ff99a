//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_clients;
mod m20240101_000002_create_addresses;
mod m20240101_000003_create_phone_numbers;
mod m20240101_000004_create_rooms;
mod m20240101_000005_create_calendar_days;
mod m20240101_000006_create_reservations;
mod m20240101_000007_create_payment_modes;
mod m20240101_000008_create_invoices;
mod m20240101_000009_create_invoice_lines;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_clients::Migration),
            Box::new(m20240101_000002_create_addresses::Migration),
            Box::new(m20240101_000003_create_phone_numbers::Migration),
            Box::new(m20240101_000004_create_rooms::Migration),
            Box::new(m20240101_000005_create_calendar_days::Migration),
            Box::new(m20240101_000006_create_reservations::Migration),
            Box::new(m20240101_000007_create_payment_modes::Migration),
            Box::new(m20240101_000008_create_invoices::Migration),
            Box::new(m20240101_000009_create_invoice_lines::Migration),
        ]
    }
}
