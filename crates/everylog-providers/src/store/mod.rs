//! Store provider implementations

pub mod memory;
pub mod postgres;

pub use memory::{MemoryStore, StoreOperation};
pub use postgres::PostgresStore;
