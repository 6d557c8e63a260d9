//! HTTP handlers
//!
//! Handlers stay thin: decode, validate, then hand the request to an
//! application service on the blocking pool. The services are synchronous
//! and hold a store connection for the length of their unit of work.

pub mod health;
pub mod invites;
pub mod logs;
pub mod orgs;
pub mod projects;
pub mod users;

use everylog_domain::error::{Error, Result};
use everylog_infrastructure::AppContext;

/// Run a synchronous service call off the async workers
pub async fn run_blocking<T, F>(context: &AppContext, task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&AppContext) -> Result<T> + Send + 'static,
{
    let context = context.clone();
    tokio::task::spawn_blocking(move || task(&context))
        .await
        .map_err(|e| Error::internal(format!("Blocking task failed: {e}")))?
}
