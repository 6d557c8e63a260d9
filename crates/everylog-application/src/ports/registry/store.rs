//! Store Provider Registry
//!
//! Providers register a [`StoreProviderEntry`] in [`STORE_PROVIDERS`]; the
//! bootstrap resolves the configured name to a live provider.

use std::sync::Arc;
use std::time::Duration;

use everylog_domain::ports::StoreProvider;

/// Configuration for store provider creation
///
/// Providers use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct StoreProviderConfig {
    /// Provider name (e.g., "postgres", "memory")
    pub provider: String,
    /// Connection URL
    pub url: Option<String>,
    /// Maximum pooled connections
    pub max_connections: Option<u32>,
    /// Minimum idle connections kept open
    pub min_idle: Option<u32>,
    /// How long to wait for a pooled connection
    pub connection_timeout: Option<Duration>,
    /// Close connections idle for longer than this
    pub idle_timeout: Option<Duration>,
    /// Close connections older than this
    pub max_lifetime: Option<Duration>,
}

impl StoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the connection URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the pool size
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    /// Set the minimum idle connections
    pub fn with_min_idle(mut self, min_idle: u32) -> Self {
        self.min_idle = Some(min_idle);
        self
    }

    /// Set the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    /// Set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Set the maximum connection lifetime
    pub fn with_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = Some(lifetime);
        self
    }
}

/// Registry entry for store providers
pub struct StoreProviderEntry {
    /// Unique provider name (e.g., "postgres", "memory")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&StoreProviderConfig) -> Result<Arc<dyn StoreProvider>, String>,
}

#[linkme::distributed_slice]
pub static STORE_PROVIDERS: [StoreProviderEntry] = [..];

/// Resolve store provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn StoreProvider>)` - Created provider instance
/// * `Err(String)` - Provider not found or creation failed
pub fn resolve_store_provider(
    config: &StoreProviderConfig,
) -> Result<Arc<dyn StoreProvider>, String> {
    if let Some(entry) = STORE_PROVIDERS.iter().find(|e| e.name == config.provider) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = STORE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown store provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered store providers as `(name, description)`
pub fn list_store_providers() -> Vec<(&'static str, &'static str)> {
    STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
