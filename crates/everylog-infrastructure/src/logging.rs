//! Structured logging with tracing
//!
//! Stdout output (plain or JSON) plus an optional daily-rolling file. The
//! `EVERYLOG_LOG` environment variable overrides the configured filter.

use std::ffi::OsStr;
use std::path::Path;

use everylog_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

pub use crate::config::LoggingConfig;
use crate::constants::{LOG_FILE_STEM, LOG_FILTER_ENV};

type Filtered = Layered<EnvFilter, Registry>;
type OutputLayer = Box<dyn Layer<Filtered> + Send + Sync>;

/// Install the global subscriber described by `config`
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut outputs = vec![output_layer(std::io::stdout, config.json_format, true)];
    if let Some(path) = &config.file_output {
        let appender = tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_stem().unwrap_or_else(|| OsStr::new(LOG_FILE_STEM)),
        );
        outputs.push(output_layer(appender, config.json_format, false));
    }

    Registry::default()
        .with(filter)
        .with(outputs)
        .try_init()
        .map_err(|e| Error::configuration_with_source("Failed to install tracing subscriber", e))?;

    info!(%level, file = ?config.file_output, "Logging initialized");
    Ok(())
}

/// One formatting layer; the console variant adds colors and source locations
fn output_layer<W>(writer: W, json: bool, console: bool) -> OutputLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(console)
        .with_target(true)
        .with_thread_ids(console)
        .with_file(console)
        .with_line_number(console);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

pub(crate) fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found");
    }
}
