//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for everylog.
//!
//! ### Security & Authentication
//! | Module | Description |
//! |--------|-------------|
//! | [`crypto`] | HS256 session token codec, API key generation |
//! | [`clock`] | System and manual clocks |
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML, environment) |
//! | [`bootstrap`] | Composition root building every service |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{AppContext, init_app, init_app_with_store};
pub use error_ext::ErrorContext;
