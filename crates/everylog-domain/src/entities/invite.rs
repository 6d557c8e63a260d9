use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invitation to a project, unique by `(from_user_id, to_user_id, project_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInvite {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub from_user_id: String,
    pub to_user_id: String,
    pub project_id: String,
    pub status: String,
}

/// Invitation to an organization, unique by `(from_user_id, to_user_id, org_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInvite {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub from_user_id: String,
    pub to_user_id: String,
    pub org_id: String,
    pub status: String,
}
