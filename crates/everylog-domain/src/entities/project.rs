use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project, unique by `(user_id, name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Grant linking a user to a project they may act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermittedProject {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
}

/// The single live API key of a grant
///
/// Re-issuing overwrites `key` in place; there is never more than one row per
/// `permitted_project_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub permitted_project_id: String,
    pub key: String,
}
