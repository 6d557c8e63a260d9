//! Server configuration types

use crate::constants::{DEFAULT_HTTP_PORT, DEFAULT_SERVER_HOST};
use serde::{Deserialize, Serialize};

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}
