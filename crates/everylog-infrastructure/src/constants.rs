//! Infrastructure layer constants
//!
//! Domain rules (token lifetime, key length, owner level) are defined in
//! `everylog_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "everylog.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "everylog";

/// Environment variable prefix for configuration (`EVERYLOG__AUTH__JWT__SECRET`)
pub const CONFIG_ENV_PREFIX: &str = "EVERYLOG";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Signing key variable understood for compatibility with existing deployments
pub const LEGACY_JWT_SIGNING_KEY_ENV: &str = "JWT_SIGNING_KEY";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "EVERYLOG_LOG";

// ============================================================================
// AUTHENTICATION CONSTANTS
// ============================================================================

/// Default session token lifetime in seconds, the domain's 60 minutes
pub const JWT_DEFAULT_EXPIRATION_SECS: u64 =
    everylog_domain::constants::SESSION_TOKEN_LIFETIME_SECS.unsigned_abs();

/// Minimum accepted length of the JWT signing secret
pub const JWT_MIN_SECRET_LENGTH: usize = 32;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "user_id";

/// Header carrying a project API key
pub const API_KEY_HEADER: &str = "api_key";

/// Cookie (and header) carrying the session token
pub const SESSION_COOKIE_NAME: &str = "Authorization";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

// ============================================================================
// DATABASE CONSTANTS
// ============================================================================

/// Default store provider
pub const DEFAULT_STORE_PROVIDER: &str = "postgres";

/// Default database URL
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/everylog";

/// Default maximum pooled connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default pool checkout timeout in seconds
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Default idle connection timeout in seconds
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default maximum connection lifetime in seconds
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used by the rolling file appender
pub const LOG_FILE_STEM: &str = "everylog";
