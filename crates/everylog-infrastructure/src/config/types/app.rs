//! Root configuration type

use serde::{Deserialize, Serialize};

use super::{AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener
    pub server: ServerConfig,

    /// Store provider and pool sizing
    pub database: DatabaseConfig,

    /// Session token signing and credential transport
    pub auth: AuthConfig,

    /// Logging output
    pub logging: LoggingConfig,
}
