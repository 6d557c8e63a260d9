//! Server Initialization
//!
//! Configuration is loaded first, then logging is installed, then the
//! application context is wired and handed to Rocket.

use std::path::Path;

use everylog_infrastructure::config::{AppConfig, ConfigLoader};
use everylog_infrastructure::init_app;
use everylog_infrastructure::logging::init_logging;
use tracing::info;

use crate::routes::everylog_rocket;

/// Load configuration, wire every service and serve until shutdown
pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;

    let host = config.server.host.clone();
    let port = config.server.port;
    info!(
        host = %host,
        port,
        provider = %config.database.provider,
        "Starting everylog server"
    );

    let context = init_app(config)?;

    let figment = rocket::Config::figment()
        .merge(("address", host))
        .merge(("port", port));

    everylog_rocket(context)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {e}"))?;

    info!("everylog server stopped");
    Ok(())
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
