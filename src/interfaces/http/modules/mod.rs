pub mod clients;
pub mod health;
pub mod invoices;
pub mod metrics;
pub mod phone_numbers;
pub mod request_id;
pub mod reservations;
pub mod rooms;
