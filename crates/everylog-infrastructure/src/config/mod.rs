//! Configuration
//!
//! Sources, later overriding earlier:
//! 1. `AppConfig::default()`
//! 2. TOML file (explicit path, or `everylog.toml` discovered on disk)
//! 3. `JWT_SIGNING_KEY` (compatibility with existing deployments)
//! 4. `EVERYLOG__SECTION__KEY` environment variables

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{
    ApiKeyConfig, AppConfig, AuthConfig, DatabaseConfig, JwtConfig, LoggingConfig, ServerConfig,
    SessionCookieConfig,
};
