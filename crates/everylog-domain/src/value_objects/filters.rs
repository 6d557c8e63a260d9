use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional filters for log listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    pub project_id: Option<String>,
    pub level_id: Option<i32>,
    pub process_id: Option<String>,
    pub org_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Optional filters for organization listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgFilter {
    pub org_id: Option<String>,
    /// SQL `LIKE` pattern (`%` and `_` wildcards)
    pub name: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Optional filters for project and organization invite listing
///
/// `target_id` is the project id or the org id depending on the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteFilter {
    pub target_id: Option<String>,
    pub status: Option<String>,
    pub from_user_id: Option<String>,
    pub to_user_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
