//! Rooms module (read-only catalogue)

pub mod handlers;

pub use handlers::*;
