use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account row
///
/// Password and session token are not part of this row; they are read only
/// through [`UserSecret`] and the session token store operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Link to the PII profile, set once the profile row exists
    pub pii_id: Option<String>,
}

/// Personally identifying profile, stored apart from the account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub password: String,
}

/// What password authentication reads back for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSecret {
    pub user_id: String,
    pub email: String,
    pub password: String,
}
