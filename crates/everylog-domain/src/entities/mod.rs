//! Domain Entities
//!
//! Rows with identity. Identifiers are opaque strings (UUID v4 text
//! generated by the application layer).
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`User`] | Account row, linked to its [`UserProfile`] |
//! | [`Org`] | Organization with an owning [`Membership`] |
//! | [`Project`] | Project with a [`PermittedProject`] grant for its creator |
//! | [`ApiKey`] | Single live key bound to a grant |
//! | [`LogRecord`] | Immutable log line written through an API key |
//! | [`ProjectInvite`] / [`OrgInvite`] | Pending invitations |

/// Invitation entities
pub mod invite;
/// Log record entity
pub mod log_record;
/// Organization and membership entities
pub mod org;
/// Project, grant and API key entities
pub mod project;
/// User and profile entities
pub mod user;

pub use invite::{OrgInvite, ProjectInvite};
pub use log_record::LogRecord;
pub use org::{Membership, Org};
pub use project::{ApiKey, PermittedProject, Project};
pub use user::{User, UserProfile, UserSecret};
