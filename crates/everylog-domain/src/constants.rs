//! Domain layer constants
//!
//! Values that are part of the access-control rules themselves. Transport
//! and configuration defaults live in `everylog_infrastructure::constants`.

// ============================================================================
// SESSION CONSTANTS
// ============================================================================

/// Lifetime of a freshly minted session token, in seconds (60 minutes)
pub const SESSION_TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Prefix some clients put in front of the session token
pub const SESSION_TOKEN_PREFIX: &str = "Bearer: ";

/// Conventional RFC 6750 prefix, also accepted
pub const BEARER_PREFIX: &str = "Bearer ";

// ============================================================================
// API KEY CONSTANTS
// ============================================================================

/// Number of random bytes behind an API key
pub const API_KEY_BYTES: usize = 16;

/// Length of the hex-encoded API key
pub const API_KEY_LENGTH: usize = API_KEY_BYTES * 2;

// ============================================================================
// MEMBERSHIP CONSTANTS
// ============================================================================

/// Privilege level granted to the creator of an organization
pub const ORG_OWNER_LEVEL: i32 = 500;

/// Status of a freshly created invite
pub const INVITE_STATUS_PENDING: &str = "pending";
