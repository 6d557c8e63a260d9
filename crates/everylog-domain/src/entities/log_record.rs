use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A log line written by a producer holding a project API key
///
/// Records are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub project_id: String,
    pub level_id: i32,
    pub process_id: Option<String>,
    pub message: String,
    pub traceback: Option<String>,
    /// Organization the record is tagged with, used by the org filter
    pub org_id: Option<String>,
}
