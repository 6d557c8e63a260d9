//! # everylog server
//!
//! HTTP boundary for everylog. Translates headers, cookies and JSON bodies
//! into calls on the application services, and their errors into
//! `{"error": "<message>"}` responses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use everylog_server::run;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Defaults, then everylog.toml, then environment
//!     run(None).await
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`guards`] | Caller id, API key and session request guards |
//! | [`handlers`] | Endpoint handlers |
//! | [`error`] | Error to status mapping and catchers |
//! | [`routes`] | Route table and Rocket builder |

pub mod constants;
pub mod error;
pub mod guards;
pub mod handlers;
pub mod init;
pub mod models;
pub mod routes;

pub use error::{ApiError, ErrorBody, status_for};
pub use init::run;
pub use routes::everylog_rocket;
