//! Configuration types module

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod server;

pub use app::AppConfig;
pub use auth::{ApiKeyConfig, AuthConfig, JwtConfig, SessionCookieConfig};
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;
