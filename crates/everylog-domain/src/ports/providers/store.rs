//! Store Provider Port
//!
//! Every read and write goes through a [`UnitOfWork`] opened by a
//! [`StoreProvider`]. Callers never pick between transactional and
//! non-transactional paths: a unit of work is always committed or rolled
//! back as a whole.
//!
//! Store operations report [`StoreError`], the raw failure. The application
//! layer classifies it before anything reaches a caller.

use thiserror::Error;

use crate::entities::{
    ApiKey, LogRecord, Membership, Org, OrgInvite, PermittedProject, Project, ProjectInvite,
    User, UserProfile, UserSecret,
};
use crate::error::BoxedSource;
use crate::value_objects::{FilteredQuery, Grant};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Raw store failure
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Constraint or column set that was violated
        constraint: String,
    },

    /// A row the operation needed does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Kind of row that was looked up
        entity: String,
    },

    /// Connection, driver or injected failure
    #[error("store backend failure: {message}")]
    Backend {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

impl StoreError {
    pub fn unique<S: Into<String>>(constraint: S) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }

    pub fn not_found<S: Into<String>>(entity: S) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }

    pub fn backend_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Users, secrets, session tokens and API keys
pub trait CredentialStore {
    fn create_user(&mut self, user: &User) -> StoreResult<()>;

    /// Fails with `UniqueViolation` when the email is taken
    fn create_user_profile(&mut self, profile: &UserProfile) -> StoreResult<()>;

    /// Point the user row at its profile
    fn link_user_profile(&mut self, user_id: &str, pii_id: &str) -> StoreResult<()>;

    /// Fails with `NotFound` when the user or its profile is absent
    fn find_user_secret(&mut self, user_id: &str) -> StoreResult<UserSecret>;

    /// `Ok(None)` when the user exists but has never logged in
    fn find_session_token(&mut self, user_id: &str) -> StoreResult<Option<String>>;

    /// Overwrite the user's session token; `NotFound` when the user is absent
    fn store_session_token(&mut self, user_id: &str, token: &str) -> StoreResult<()>;

    /// Grant bound to an API key; `NotFound` for unknown keys
    fn find_api_key_grant(&mut self, key: &str) -> StoreResult<Grant>;

    /// Insert the key, or overwrite the existing key of the same grant
    fn upsert_api_key(&mut self, api_key: &ApiKey) -> StoreResult<()>;
}

/// Projects, permitted-project grants, organizations and memberships
pub trait GrantStore {
    /// Fails with `UniqueViolation` on a duplicate `(user_id, name)`
    fn create_project(&mut self, project: &Project) -> StoreResult<()>;

    fn create_permitted_project(&mut self, grant: &PermittedProject) -> StoreResult<()>;

    fn find_permitted_project(
        &mut self,
        user_id: &str,
        project_id: &str,
    ) -> StoreResult<PermittedProject>;

    /// Fails with `UniqueViolation` on a duplicate `(owner, name)`
    fn create_org(&mut self, org: &Org) -> StoreResult<()>;

    fn create_membership(&mut self, membership: &Membership) -> StoreResult<()>;

    fn find_membership(&mut self, user_id: &str, org_id: &str) -> StoreResult<Membership>;

    /// Organizations the caller is a member of, filtered by `query`
    fn query_orgs(&mut self, query: &FilteredQuery) -> StoreResult<Vec<Org>>;
}

/// Log records and invites
pub trait RecordStore {
    fn create_log(&mut self, record: &LogRecord) -> StoreResult<()>;

    fn query_logs(&mut self, query: &FilteredQuery) -> StoreResult<Vec<LogRecord>>;

    /// Fails with `UniqueViolation` on a duplicate `(from, to, project)`
    fn create_project_invite(&mut self, invite: &ProjectInvite) -> StoreResult<()>;

    fn query_project_invites(&mut self, query: &FilteredQuery)
    -> StoreResult<Vec<ProjectInvite>>;

    /// Fails with `UniqueViolation` on a duplicate `(from, to, org)`
    fn create_org_invite(&mut self, invite: &OrgInvite) -> StoreResult<()>;

    fn query_org_invites(&mut self, query: &FilteredQuery) -> StoreResult<Vec<OrgInvite>>;
}

/// One atomic scope over every store operation
///
/// Dropping a unit of work without committing discards its writes.
pub trait UnitOfWork: CredentialStore + GrantStore + RecordStore + Send {
    fn commit(self: Box<Self>) -> StoreResult<()>;

    fn rollback(self: Box<Self>) -> StoreResult<()>;
}

/// Backing store
pub trait StoreProvider: Send + Sync {
    /// Open a unit of work
    fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>>;

    /// Provider identifier (e.g. "postgres", "memory")
    fn provider_name(&self) -> &str;

    /// Cheap round trip proving the store is reachable
    fn health_check(&self) -> StoreResult<()>;
}
