//! Application Ports
//!
//! Port traits live in `everylog-domain`; this module holds the provider
//! registry that lets providers plug themselves in at link time.

/// Provider registries
pub mod registry;

pub use registry::{
    STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry, list_store_providers,
    resolve_store_provider,
};
