//! Domain Services
//!
//! The access-control core. Every use case composes these four pieces.

/// Atomic execution of compound writes
pub mod orchestrator;
/// Credential to grant resolution
pub mod permission;
/// Caller-scoped listing statements
pub mod query_filter;
/// Password authentication and session tokens
pub mod session;

pub use orchestrator::{MutationOrchestrator, StepError, StepResult};
pub use permission::{PermissionResolver, resolve_grant_in};
pub use query_filter::{
    QueryFilterBuilder, log_listing, org_invite_listing, org_listing, project_invite_listing,
};
pub use session::{SessionTokenAuthority, select_presented_token, strip_token_prefix};
