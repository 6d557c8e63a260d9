//! Database configuration types

use crate::constants::{
    DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_DATABASE_URL, DEFAULT_IDLE_TIMEOUT_SECS,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_LIFETIME_SECS, DEFAULT_STORE_PROVIDER,
};
use everylog_application::ports::StoreProviderConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Registered store provider name ("postgres" or "memory")
    pub provider: String,

    /// Connection URL
    pub url: String,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Minimum idle connections
    pub min_idle: Option<u32>,

    /// Pool checkout timeout in seconds
    pub connection_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: Option<u64>,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_STORE_PROVIDER.to_string(),
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_idle: None,
            connection_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS,
            idle_timeout_secs: Some(DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime_secs: Some(DEFAULT_MAX_LIFETIME_SECS),
        }
    }
}

impl DatabaseConfig {
    /// In-process store, for tests and local experiments
    pub fn memory() -> Self {
        Self {
            provider: "memory".to_string(),
            ..Self::default()
        }
    }

    /// Registry configuration for the store provider
    pub fn to_provider_config(&self) -> StoreProviderConfig {
        let mut config = StoreProviderConfig::new(&self.provider)
            .with_url(&self.url)
            .with_max_connections(self.max_connections)
            .with_connection_timeout(Duration::from_secs(self.connection_timeout_secs));
        if let Some(min_idle) = self.min_idle {
            config = config.with_min_idle(min_idle);
        }
        if let Some(idle) = self.idle_timeout_secs {
            config = config.with_idle_timeout(Duration::from_secs(idle));
        }
        if let Some(lifetime) = self.max_lifetime_secs {
            config = config.with_max_lifetime(Duration::from_secs(lifetime));
        }
        config
    }
}
