use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token
///
/// `password` is embedded in plaintext because existing clients read it
/// back from the token. Anyone holding a token can read the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: String,
    pub email: String,
    pub password: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Unique per issued token
    pub jti: String,
}

/// A freshly minted session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a successful authorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}
