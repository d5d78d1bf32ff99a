//! # Grand Hotel
//!
//! Back end of a small hotel: clients with their address and phone numbers,
//! room reservations (one client per room and day), and invoices with
//! sequentially numbered lines.
//!
//! ## Architecture
//!
//! - **domain**: entities, repository traits, `DomainError`
//! - **application**: use-case services (booking, invoicing, clients, phone numbers)
//! - **infrastructure**: SeaORM persistence, migrations, in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap shared by the CLI and integration tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::create_api_router;
