//! Provider Registry
//!
//! 1. A provider defines `#[linkme::distributed_slice(STORE_PROVIDERS)]`
//! 2. This module declares the slice with `#[linkme::distributed_slice]`
//! 3. The bootstrap resolves the configured name at startup
//!
//! ## Example
//!
//! ```ignore
//! #[linkme::distributed_slice(STORE_PROVIDERS)]
//! static MEMORY_STORE: StoreProviderEntry = StoreProviderEntry {
//!     name: "memory",
//!     description: "In-process store",
//!     factory: |_config| Ok(Arc::new(MemoryStore::new())),
//! };
//! ```

/// Store provider registry
pub mod store;

pub use store::{
    STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry, list_store_providers,
    resolve_store_provider,
};
