//! In-memory store provider
//!
//! Committed tables live behind one mutex. A unit of work reads them until
//! its first write, then works on a private copy and records each write as
//! a replayable step. Commit replays the steps against the committed tables
//! under the lock and swaps the result in only if every step succeeds, so
//! other units of work never see uncommitted rows and the last commit wins.
//! Rollback discards the copy. Data is not persisted and will be lost on
//! restart.
//!
//! Any operation can be armed to fail once through [`MemoryStore::fail_on`],
//! which is how the atomicity guarantees are exercised in tests.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use everylog_application::ports::{STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry};
use everylog_domain::entities::{
    ApiKey, LogRecord, Membership, Org, OrgInvite, PermittedProject, Project, ProjectInvite,
    User, UserProfile, UserSecret,
};
use everylog_domain::ports::{
    CredentialStore, GrantStore, RecordStore, StoreError, StoreProvider, StoreResult, UnitOfWork,
};
use everylog_domain::value_objects::{FilterValue, Filterable, FilteredQuery, Grant};
use tracing::{debug, warn};

use crate::constants::{INJECTED_FAILURE_MESSAGE, MEMORY_PROVIDER_NAME};

/// Store operations that can be armed to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Begin,
    Commit,
    Rollback,
    HealthCheck,
    CreateUser,
    CreateUserProfile,
    LinkUserProfile,
    FindUserSecret,
    FindSessionToken,
    StoreSessionToken,
    FindApiKeyGrant,
    UpsertApiKey,
    CreateProject,
    CreatePermittedProject,
    FindPermittedProject,
    CreateOrg,
    CreateMembership,
    FindMembership,
    QueryOrgs,
    CreateLog,
    QueryLogs,
    CreateProjectInvite,
    QueryProjectInvites,
    CreateOrgInvite,
    QueryOrgInvites,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UserRow {
    user: User,
    token: Option<String>,
}

#[derive(Clone, Default)]
struct Tables {
    users: Vec<UserRow>,
    profiles: Vec<UserProfile>,
    orgs: Vec<Org>,
    memberships: Vec<Membership>,
    projects: Vec<Project>,
    grants: Vec<PermittedProject>,
    api_keys: Vec<ApiKey>,
    logs: Vec<LogRecord>,
    project_invites: Vec<ProjectInvite>,
    org_invites: Vec<OrgInvite>,
}

type WriteStep = Box<dyn Fn(&mut Tables) -> StoreResult<()> + Send>;

#[derive(Default)]
struct Shared {
    tables: Mutex<Tables>,
    armed: Mutex<HashSet<StoreOperation>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory store provider
///
/// Cloning is cheap; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call of `operation` fail with a backend error
    pub fn fail_on(&self, operation: StoreOperation) {
        lock(&self.shared.armed).insert(operation);
    }

    /// Current session token of `user_id`
    pub fn session_token(&self, user_id: &str) -> Option<String> {
        self.tables()
            .users
            .iter()
            .find(|row| row.user.id == user_id)
            .and_then(|row| row.token.clone())
    }

    /// Every project row
    pub fn projects(&self) -> Vec<Project> {
        self.tables().projects.clone()
    }

    /// Every API key row
    pub fn api_keys(&self) -> Vec<ApiKey> {
        self.tables().api_keys.clone()
    }

    /// Number of user rows
    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }

    /// Number of log rows
    pub fn log_count(&self) -> usize {
        self.tables().logs.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        lock(&self.shared.tables)
    }

    fn trip(&self, operation: StoreOperation) -> StoreResult<()> {
        if lock(&self.shared.armed).remove(&operation) {
            warn!(operation = ?operation, "Injected store failure");
            return Err(StoreError::backend(format!(
                "{INJECTED_FAILURE_MESSAGE}: {operation:?}"
            )));
        }
        Ok(())
    }
}

impl StoreProvider for MemoryStore {
    fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        self.trip(StoreOperation::Begin)?;
        Ok(Box::new(MemoryUnitOfWork {
            store: self.clone(),
            working: None,
            pending: Vec::new(),
        }))
    }

    fn provider_name(&self) -> &str {
        MEMORY_PROVIDER_NAME
    }

    fn health_check(&self) -> StoreResult<()> {
        self.trip(StoreOperation::HealthCheck)
    }
}

/// Tables as seen by one unit of work
enum View<'a> {
    Committed(MutexGuard<'a, Tables>),
    Working(&'a Tables),
}

impl Deref for View<'_> {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        match self {
            Self::Committed(guard) => guard,
            Self::Working(tables) => tables,
        }
    }
}

/// Unit of work over a private copy of the tables
struct MemoryUnitOfWork {
    store: MemoryStore,
    /// Copy taken at the first write, with every write applied
    working: Option<Tables>,
    /// Writes to replay against the committed tables
    pending: Vec<WriteStep>,
}

impl MemoryUnitOfWork {
    fn view(&self) -> View<'_> {
        match &self.working {
            Some(tables) => View::Working(tables),
            None => View::Committed(self.store.tables()),
        }
    }

    /// Apply `step` to the working copy and queue it for commit
    fn write(&mut self, operation: StoreOperation, step: WriteStep) -> StoreResult<()> {
        self.store.trip(operation)?;
        let store = &self.store;
        let working = self.working.get_or_insert_with(|| store.tables().clone());
        step(working)?;
        self.pending.push(step);
        Ok(())
    }

    /// Insert `row` unless an existing row `conflicts` with it
    fn insert<T>(
        &mut self,
        operation: StoreOperation,
        table: fn(&mut Tables) -> &mut Vec<T>,
        row: &T,
        constraint: &'static str,
        conflicts: fn(&T, &T) -> bool,
    ) -> StoreResult<()>
    where
        T: Clone + Send + 'static,
    {
        let row = row.clone();
        self.write(
            operation,
            Box::new(move |tables: &mut Tables| {
                let rows = table(tables);
                if rows.iter().any(|existing| conflicts(existing, &row)) {
                    debug!(constraint, "Unique constraint rejected insert");
                    return Err(StoreError::unique(constraint));
                }
                rows.push(row.clone());
                Ok(())
            }),
        )
    }

    /// Set a column on the row of `user_id`
    fn update_user(
        &mut self,
        operation: StoreOperation,
        user_id: &str,
        update: fn(&mut UserRow, Option<String>),
        value: Option<String>,
    ) -> StoreResult<()> {
        let user_id = user_id.to_string();
        self.write(
            operation,
            Box::new(move |tables: &mut Tables| {
                let row = tables
                    .users
                    .iter_mut()
                    .find(|row| row.user.id == user_id)
                    .ok_or_else(|| StoreError::not_found("user"))?;
                update(row, value.clone());
                Ok(())
            }),
        )
    }

    fn query<T>(
        &self,
        operation: StoreOperation,
        table: fn(&Tables) -> &Vec<T>,
        query: &FilteredQuery,
    ) -> StoreResult<Vec<T>>
    where
        T: Filterable + Clone,
    {
        self.store.trip(operation)?;
        let tables = self.view();
        Ok(table(&tables)
            .iter()
            .filter(|row| query.matches(*row))
            .cloned()
            .collect())
    }
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            debug!(
                writes = self.pending.len(),
                "Discarding uncommitted unit of work"
            );
        }
    }
}

impl CredentialStore for MemoryUnitOfWork {
    fn create_user(&mut self, user: &User) -> StoreResult<()> {
        let row = UserRow {
            user: user.clone(),
            token: None,
        };
        self.insert(
            StoreOperation::CreateUser,
            |t| &mut t.users,
            &row,
            "single_user_pkey",
            |a, b| a.user.id == b.user.id,
        )
    }

    fn create_user_profile(&mut self, profile: &UserProfile) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateUserProfile,
            |t| &mut t.profiles,
            profile,
            "user_pii_email_key",
            |a, b| a.email == b.email,
        )
    }

    fn link_user_profile(&mut self, user_id: &str, pii_id: &str) -> StoreResult<()> {
        self.update_user(
            StoreOperation::LinkUserProfile,
            user_id,
            |row, value| row.user.pii_id = value,
            Some(pii_id.to_string()),
        )
    }

    fn find_user_secret(&mut self, user_id: &str) -> StoreResult<UserSecret> {
        self.store.trip(StoreOperation::FindUserSecret)?;
        let tables = self.view();
        if !tables.users.iter().any(|row| row.user.id == user_id) {
            return Err(StoreError::not_found("user"));
        }
        tables
            .profiles
            .iter()
            .find(|profile| profile.user_id == user_id)
            .map(|profile| UserSecret {
                user_id: profile.user_id.clone(),
                email: profile.email.clone(),
                password: profile.password.clone(),
            })
            .ok_or_else(|| StoreError::not_found("user profile"))
    }

    fn find_session_token(&mut self, user_id: &str) -> StoreResult<Option<String>> {
        self.store.trip(StoreOperation::FindSessionToken)?;
        self.view()
            .users
            .iter()
            .find(|row| row.user.id == user_id)
            .map(|row| row.token.clone())
            .ok_or_else(|| StoreError::not_found("user"))
    }

    fn store_session_token(&mut self, user_id: &str, token: &str) -> StoreResult<()> {
        self.update_user(
            StoreOperation::StoreSessionToken,
            user_id,
            |row, value| row.token = value,
            Some(token.to_string()),
        )
    }

    fn find_api_key_grant(&mut self, key: &str) -> StoreResult<Grant> {
        self.store.trip(StoreOperation::FindApiKeyGrant)?;
        let tables = self.view();
        let api_key = tables
            .api_keys
            .iter()
            .find(|api_key| api_key.key == key)
            .ok_or_else(|| StoreError::not_found("api key"))?;
        tables
            .grants
            .iter()
            .find(|grant| grant.id == api_key.permitted_project_id)
            .map(|grant| Grant {
                permitted_project_id: grant.id.clone(),
                user_id: grant.user_id.clone(),
                project_id: grant.project_id.clone(),
            })
            .ok_or_else(|| StoreError::not_found("permitted project"))
    }

    fn upsert_api_key(&mut self, api_key: &ApiKey) -> StoreResult<()> {
        let api_key = api_key.clone();
        self.write(
            StoreOperation::UpsertApiKey,
            Box::new(move |tables: &mut Tables| {
                if let Some(row) = tables
                    .api_keys
                    .iter_mut()
                    .find(|row| row.permitted_project_id == api_key.permitted_project_id)
                {
                    row.key.clone_from(&api_key.key);
                } else {
                    tables.api_keys.push(api_key.clone());
                }
                Ok(())
            }),
        )
    }
}

/// Org row joined with one of its memberships
struct MemberOrg<'a> {
    org: &'a Org,
    membership: &'a Membership,
}

impl Filterable for MemberOrg<'_> {
    fn field(&self, column: &str) -> Option<FilterValue> {
        match column {
            "user_id" => Some(FilterValue::Text(self.membership.user_id.clone())),
            "org_id" => Some(FilterValue::Text(self.membership.org_id.clone())),
            "level" => Some(FilterValue::Int(self.membership.level)),
            _ => self.org.field(column),
        }
    }
}

impl GrantStore for MemoryUnitOfWork {
    fn create_project(&mut self, project: &Project) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateProject,
            |t| &mut t.projects,
            project,
            "project_user_id_name_key",
            |a, b| a.id == b.id || (a.user_id == b.user_id && a.name == b.name),
        )
    }

    fn create_permitted_project(&mut self, grant: &PermittedProject) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreatePermittedProject,
            |t| &mut t.grants,
            grant,
            "permitted_project_user_id_project_id_key",
            |a, b| a.id == b.id || (a.user_id == b.user_id && a.project_id == b.project_id),
        )
    }

    fn find_permitted_project(
        &mut self,
        user_id: &str,
        project_id: &str,
    ) -> StoreResult<PermittedProject> {
        self.store.trip(StoreOperation::FindPermittedProject)?;
        self.view()
            .grants
            .iter()
            .find(|grant| grant.user_id == user_id && grant.project_id == project_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("permitted project"))
    }

    fn create_org(&mut self, org: &Org) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateOrg,
            |t| &mut t.orgs,
            org,
            "org_owner_name_key",
            |a, b| a.id == b.id || (a.owner == b.owner && a.name == b.name),
        )
    }

    fn create_membership(&mut self, membership: &Membership) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateMembership,
            |t| &mut t.memberships,
            membership,
            "user_org_user_id_org_id_key",
            |a, b| a.id == b.id || (a.user_id == b.user_id && a.org_id == b.org_id),
        )
    }

    fn find_membership(&mut self, user_id: &str, org_id: &str) -> StoreResult<Membership> {
        self.store.trip(StoreOperation::FindMembership)?;
        self.view()
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.org_id == org_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("membership"))
    }

    fn query_orgs(&mut self, query: &FilteredQuery) -> StoreResult<Vec<Org>> {
        self.store.trip(StoreOperation::QueryOrgs)?;
        let tables = self.view();
        let orgs = tables
            .memberships
            .iter()
            .filter_map(|membership| {
                tables
                    .orgs
                    .iter()
                    .find(|org| org.id == membership.org_id)
                    .map(|org| MemberOrg { org, membership })
            })
            .filter(|row| query.matches(row))
            .map(|row| row.org.clone())
            .collect();
        Ok(orgs)
    }
}

impl RecordStore for MemoryUnitOfWork {
    fn create_log(&mut self, record: &LogRecord) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateLog,
            |t| &mut t.logs,
            record,
            "log_pkey",
            |a, b| a.id == b.id,
        )
    }

    fn query_logs(&mut self, query: &FilteredQuery) -> StoreResult<Vec<LogRecord>> {
        self.query(StoreOperation::QueryLogs, |t| &t.logs, query)
    }

    fn create_project_invite(&mut self, invite: &ProjectInvite) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateProjectInvite,
            |t| &mut t.project_invites,
            invite,
            "project_invite_from_to_project_key",
            |a, b| {
                a.from_user_id == b.from_user_id
                    && a.to_user_id == b.to_user_id
                    && a.project_id == b.project_id
            },
        )
    }

    fn query_project_invites(
        &mut self,
        query: &FilteredQuery,
    ) -> StoreResult<Vec<ProjectInvite>> {
        self.query(
            StoreOperation::QueryProjectInvites,
            |t| &t.project_invites,
            query,
        )
    }

    fn create_org_invite(&mut self, invite: &OrgInvite) -> StoreResult<()> {
        self.insert(
            StoreOperation::CreateOrgInvite,
            |t| &mut t.org_invites,
            invite,
            "org_invite_from_to_org_key",
            |a, b| {
                a.from_user_id == b.from_user_id
                    && a.to_user_id == b.to_user_id
                    && a.org_id == b.org_id
            },
        )
    }

    fn query_org_invites(&mut self, query: &FilteredQuery) -> StoreResult<Vec<OrgInvite>> {
        self.query(StoreOperation::QueryOrgInvites, |t| &t.org_invites, query)
    }
}

impl UnitOfWork for MemoryUnitOfWork {
    fn commit(mut self: Box<Self>) -> StoreResult<()> {
        let pending = std::mem::take(&mut self.pending);
        self.store.trip(StoreOperation::Commit)?;
        if pending.is_empty() {
            return Ok(());
        }

        let mut committed = self.store.tables();
        let mut next = committed.clone();
        for step in &pending {
            step(&mut next)?;
        }
        *committed = next;
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> StoreResult<()> {
        self.pending.clear();
        self.store.trip(StoreOperation::Rollback)
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn memory_store_factory(_config: &StoreProviderConfig) -> Result<Arc<dyn StoreProvider>, String> {
    Ok(Arc::new(MemoryStore::new()))
}

#[linkme::distributed_slice(STORE_PROVIDERS)]
static MEMORY_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: MEMORY_PROVIDER_NAME,
    description: "In-memory store (fast, non-persistent)",
    factory: memory_store_factory,
};
