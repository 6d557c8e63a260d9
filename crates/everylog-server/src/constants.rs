//! Server-specific constants
//!
//! Response messages and fallback strings used at the HTTP boundary.

// ============================================================================
// RESPONSE MESSAGES
// ============================================================================

/// Body of a successful `POST /authorize`
pub const AUTHORIZED_MESSAGE: &str = "Authorized";

/// Error message for request bodies or query strings that fail to decode
pub const JSON_PARSING_ERROR: &str = "Json parsing error";

/// Error message for unknown routes
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Fallback for failures with no more specific message
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// ============================================================================
// HEALTH
// ============================================================================

/// Health status reported when the store answers
pub const HEALTH_STATUS_OK: &str = "healthy";

/// Health status reported when the store check fails
pub const HEALTH_STATUS_DEGRADED: &str = "degraded";

// ============================================================================
// CREDENTIAL NAMES
// ============================================================================

/// Name reported when the user id header is absent
pub const USER_ID_CREDENTIAL: &str = "User id";

/// Name reported when the API key header is absent
pub const API_KEY_CREDENTIAL: &str = "Api key";

/// Name reported when neither cookie nor body carries a session token
pub const TOKEN_CREDENTIAL: &str = "Authorization token";
