//! # everylog - Store Provider Implementations
//!
//! Each provider implements the `StoreProvider` port defined in
//! `everylog-domain` and registers itself in the `STORE_PROVIDERS` slice
//! declared by `everylog-application`.
//!
//! | Provider | Name | Notes |
//! |----------|------|-------|
//! | [`PostgresStore`] | `postgres` | r2d2 pool, one transaction per unit of work |
//! | [`MemoryStore`] | `memory` | Non-persistent, undo-log rollback, injectable failures |
//!
//! ## Usage
//!
//! ```ignore
//! use everylog_providers::store::{MemoryStore, StoreOperation};
//!
//! let store = MemoryStore::new();
//! store.fail_on(StoreOperation::StoreSessionToken);
//! ```

pub use everylog_domain::ports::{StoreError, StoreProvider, StoreResult, UnitOfWork};

/// Provider-specific constants
pub mod constants;

/// Store provider implementations
///
/// Implements `StoreProvider` for PostgreSQL and in-memory backends.
pub mod store;

pub use store::{MemoryStore, PostgresStore, StoreOperation};
