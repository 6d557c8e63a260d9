//! Domain Port Interfaces
//!
//! Contracts implemented outside the domain:
//!
//! - **providers/** - persistent stores (PostgreSQL, in-memory)
//! - **infrastructure/** - clock, session token codec, API key generation
//!
//! Store ports are synchronous; the HTTP boundary moves calls onto the
//! blocking pool.

/// Infrastructure service ports
pub mod infrastructure;
/// Store provider ports
pub mod providers;

pub use infrastructure::{ApiKeyGenerator, Clock, SessionTokenCodec};
pub use providers::{
    CredentialStore, GrantStore, RecordStore, StoreError, StoreProvider, StoreResult, UnitOfWork,
};
