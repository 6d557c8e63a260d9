use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization, unique by `(owner, name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub location_id: Option<String>,
}

/// `user_org` row: a user's membership of an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub org_id: String,
    /// Privilege level, `ORG_OWNER_LEVEL` for the creator
    pub level: i32,
}
