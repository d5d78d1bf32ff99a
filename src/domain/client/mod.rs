//! Client aggregate
//!
//! Client, its exclusively-owned address, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Address, Client, ClientDetails};
pub use repository::ClientRepository;
