//! Non-persistent storage

mod memory;

pub use memory::InMemoryStore;
