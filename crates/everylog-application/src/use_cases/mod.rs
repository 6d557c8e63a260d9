//! Use Cases
//!
//! Operations exposed to the HTTP boundary. The boundary authenticates the
//! caller (session or API key header) before calling in; services only see
//! an already-established caller id.

pub mod invite_service;
pub mod log_service;
pub mod org_service;
pub mod project_service;
pub mod user_service;

pub use invite_service::{InviteService, NewInvite};
pub use log_service::{LogService, NewLogRecord};
pub use org_service::{NewOrg, OrgService};
pub use project_service::{NewProject, ProjectService};
pub use user_service::{NewUser, UserService};

use everylog_domain::error::{Error, Result};

/// Fresh opaque identifier
fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// `MissingRequiredField` when `value` is empty or whitespace
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(())
}
