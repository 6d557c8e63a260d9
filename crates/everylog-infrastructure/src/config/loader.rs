//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values through Figment.

use crate::config::types::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    JWT_MIN_SECRET_LENGTH, LEGACY_JWT_SIGNING_KEY_ENV,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use everylog_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. `JWT_SIGNING_KEY`
    /// 4. Environment variables with prefix (e.g., `EVERYLOG__SERVER__PORT`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::raw()
                .only(&[LEGACY_JWT_SIGNING_KEY_ENV])
                .map(|_| "auth.jwt.secret".into()),
        );

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(&config.server)?;
    validate_database_config(&config.database)?;
    validate_auth_config(&config.auth)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_server_config(server: &ServerConfig) -> Result<()> {
    if server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    Ok(())
}

fn validate_database_config(database: &DatabaseConfig) -> Result<()> {
    if database.max_connections == 0 {
        return Err(Error::configuration(
            "Database max_connections must be at least 1",
        ));
    }
    if database.provider == "postgres" && database.url.trim().is_empty() {
        return Err(Error::configuration(
            "Database URL cannot be empty for the postgres provider",
        ));
    }
    if database
        .min_idle
        .is_some_and(|min_idle| min_idle > database.max_connections)
    {
        return Err(Error::configuration(
            "Database min_idle cannot exceed max_connections",
        ));
    }
    Ok(())
}

fn validate_auth_config(auth: &AuthConfig) -> Result<()> {
    if auth.jwt.secret.is_empty() {
        return Err(Error::configuration("JWT secret cannot be empty"));
    }
    if auth.jwt.secret.len() < JWT_MIN_SECRET_LENGTH {
        return Err(Error::configuration(format!(
            "JWT secret should be at least {JWT_MIN_SECRET_LENGTH} characters long"
        )));
    }
    if auth.jwt.expiration_secs == 0 {
        return Err(Error::configuration("JWT expiration cannot be 0"));
    }
    if auth.api_key.length < 16 || auth.api_key.length % 2 != 0 {
        return Err(Error::configuration(
            "API key length must be an even number of at least 16 hex characters",
        ));
    }
    if auth.user_id_header.is_empty()
        || auth.api_key.header.is_empty()
        || auth.session_cookie.name.is_empty()
    {
        return Err(Error::configuration(
            "Credential header and cookie names cannot be empty",
        ));
    }
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> Result<()> {
    parse_log_level(&logging.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set server configuration
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Set database configuration
    pub fn with_database(mut self, database: DatabaseConfig) -> Self {
        self.config.database = database;
        self
    }

    /// Set authentication configuration
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.config.auth = auth;
        self
    }

    /// Set the JWT signing secret
    pub fn with_jwt_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.config.auth.jwt.secret = secret.into();
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
