//! PostgreSQL store provider
//!
//! Connections come from an r2d2 pool. Each unit of work checks out one
//! connection and wraps its statements in `BEGIN` / `COMMIT`; a unit of work
//! dropped before committing issues `ROLLBACK` so the connection returns to
//! the pool clean.

mod rows;

use std::sync::Arc;
use std::time::Duration;

use everylog_application::ports::{STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry};
use everylog_domain::entities::{
    ApiKey, LogRecord, Membership, Org, OrgInvite, PermittedProject, Project, ProjectInvite,
    User, UserProfile, UserSecret,
};
use everylog_domain::ports::{
    CredentialStore, GrantStore, RecordStore, StoreError, StoreProvider, StoreResult, UnitOfWork,
};
use everylog_domain::value_objects::{FilterValue, FilteredQuery, Grant};
use postgres::error::SqlState;
use postgres::types::ToSql;
use r2d2::{Pool, PooledConnection};
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::NoTls;
use tracing::{debug, error, info, warn};

use crate::constants::{POSTGRES_HEALTH_QUERY, POSTGRES_PROVIDER_NAME, POSTGRES_SCHEMA};

type PgPool = Pool<PostgresConnectionManager<NoTls>>;
type PgConnection = PooledConnection<PostgresConnectionManager<NoTls>>;

/// PostgreSQL store provider
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a pooled store from provider configuration
    pub fn connect(config: &StoreProviderConfig) -> StoreResult<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StoreError::backend("Database URL is required"))?;

        let manager = PostgresConnectionManager::new(
            url.parse()
                .map_err(|e| StoreError::backend_with_source("Invalid database URL", e))?,
            NoTls,
        );

        let mut builder = Pool::builder();
        if let Some(max_connections) = config.max_connections {
            builder = builder.max_size(max_connections);
        }
        let pool = builder
            .min_idle(config.min_idle)
            .max_lifetime(config.max_lifetime)
            .idle_timeout(config.idle_timeout)
            .connection_timeout(
                config
                    .connection_timeout
                    .unwrap_or_else(|| Duration::from_secs(30)),
            )
            .build(manager)
            .map_err(|e| StoreError::backend_with_source("Failed to create connection pool", e))?;

        info!(
            max_connections = pool.max_size(),
            "PostgreSQL connection pool ready"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the reference schema; every statement is `IF NOT EXISTS`
    pub fn apply_schema(&self) -> StoreResult<()> {
        let mut conn = self.connection()?;
        conn.batch_execute(POSTGRES_SCHEMA)
            .map_err(|e| classify("apply schema", e))?;
        info!("Applied reference schema");
        Ok(())
    }

    fn connection(&self) -> StoreResult<PgConnection> {
        self.pool.get().map_err(|e| {
            error!(error = %e, "Failed to get database connection");
            StoreError::backend_with_source("Failed to get database connection", e)
        })
    }
}

impl StoreProvider for PostgresStore {
    fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let mut conn = self.connection()?;
        conn.batch_execute("BEGIN")
            .map_err(|e| classify("begin", e))?;
        Ok(Box::new(PgUnitOfWork {
            conn,
            finished: false,
        }))
    }

    fn provider_name(&self) -> &str {
        POSTGRES_PROVIDER_NAME
    }

    fn health_check(&self) -> StoreResult<()> {
        let mut conn = self.connection()?;
        conn.execute(POSTGRES_HEALTH_QUERY, &[])
            .map_err(|e| classify("health check", e))?;
        Ok(())
    }
}

/// Map a driver error onto [`StoreError`], logging it at the point of origin
fn classify(operation: &str, e: postgres::Error) -> StoreError {
    if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        let constraint = e
            .as_db_error()
            .and_then(|db| db.constraint())
            .unwrap_or("unique")
            .to_string();
        debug!(operation, constraint = %constraint, "Unique constraint rejected write");
        return StoreError::unique(constraint);
    }
    error!(operation, error = %e, "PostgreSQL operation failed");
    StoreError::backend_with_source(format!("{operation} failed"), e)
}

fn bind(value: &FilterValue) -> &(dyn ToSql + Sync) {
    match value {
        FilterValue::Text(text) => text,
        FilterValue::Int(int) => int,
        FilterValue::Timestamp(timestamp) => timestamp,
    }
}

/// One open transaction on a pooled connection
struct PgUnitOfWork {
    conn: PgConnection,
    finished: bool,
}

impl PgUnitOfWork {
    fn execute(
        &mut self,
        operation: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<u64> {
        self.conn
            .execute(sql, params)
            .map_err(|e| classify(operation, e))
    }

    fn query_one<T>(
        &mut self,
        operation: &str,
        entity: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
        map: fn(&postgres::Row) -> Result<T, postgres::Error>,
    ) -> StoreResult<T> {
        let row = self
            .conn
            .query_opt(sql, params)
            .map_err(|e| classify(operation, e))?
            .ok_or_else(|| StoreError::not_found(entity))?;
        map(&row).map_err(|e| classify(operation, e))
    }

    fn query_filtered<T>(
        &mut self,
        operation: &str,
        query: &FilteredQuery,
        map: fn(&postgres::Row) -> Result<T, postgres::Error>,
    ) -> StoreResult<Vec<T>> {
        let params: Vec<&(dyn ToSql + Sync)> = query.args().iter().map(bind).collect();
        self.conn
            .query(query.sql(), &params)
            .map_err(|e| classify(operation, e))?
            .iter()
            .map(|row| map(row).map_err(|e| classify(operation, e)))
            .collect()
    }

    fn finish(&mut self, statement: &str) -> StoreResult<()> {
        self.finished = true;
        self.conn
            .batch_execute(statement)
            .map_err(|e| classify(statement, e))
    }
}

impl Drop for PgUnitOfWork {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.conn.batch_execute("ROLLBACK") {
                warn!(error = %e, "Failed to roll back abandoned unit of work");
            }
        }
    }
}

impl CredentialStore for PgUnitOfWork {
    fn create_user(&mut self, user: &User) -> StoreResult<()> {
        self.execute(
            "create user",
            "INSERT INTO single_user (id, created_at, pii_id) VALUES ($1, $2, $3)",
            &[&user.id, &user.created_at, &user.pii_id],
        )?;
        Ok(())
    }

    fn create_user_profile(&mut self, profile: &UserProfile) -> StoreResult<()> {
        self.execute(
            "create user profile",
            "INSERT INTO user_pii (id, user_id, email, first_name, last_name, password) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &profile.id,
                &profile.user_id,
                &profile.email,
                &profile.first_name,
                &profile.last_name,
                &profile.password,
            ],
        )?;
        Ok(())
    }

    fn link_user_profile(&mut self, user_id: &str, pii_id: &str) -> StoreResult<()> {
        let updated = self.execute(
            "link user profile",
            "UPDATE single_user SET pii_id = $1 WHERE id = $2",
            &[&pii_id, &user_id],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found("user"));
        }
        Ok(())
    }

    fn find_user_secret(&mut self, user_id: &str) -> StoreResult<UserSecret> {
        self.query_one(
            "find user secret",
            "user",
            "SELECT single_user.id, user_pii.email, user_pii.password FROM single_user \
             JOIN user_pii ON user_pii.id = single_user.pii_id WHERE single_user.id = $1",
            &[&user_id],
            rows::user_secret,
        )
    }

    fn find_session_token(&mut self, user_id: &str) -> StoreResult<Option<String>> {
        self.query_one(
            "find session token",
            "user",
            "SELECT token FROM single_user WHERE id = $1",
            &[&user_id],
            |row| row.try_get("token"),
        )
    }

    fn store_session_token(&mut self, user_id: &str, token: &str) -> StoreResult<()> {
        let updated = self.execute(
            "store session token",
            "UPDATE single_user SET token = $1 WHERE id = $2",
            &[&token, &user_id],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found("user"));
        }
        Ok(())
    }

    fn find_api_key_grant(&mut self, key: &str) -> StoreResult<Grant> {
        self.query_one(
            "find api key grant",
            "api key",
            "SELECT permitted_project.id, permitted_project.user_id, \
             permitted_project.project_id FROM api_key JOIN permitted_project \
             ON permitted_project.id = api_key.permitted_project_id WHERE api_key.key = $1",
            &[&key],
            rows::grant,
        )
    }

    fn upsert_api_key(&mut self, api_key: &ApiKey) -> StoreResult<()> {
        self.execute(
            "upsert api key",
            "INSERT INTO api_key (permitted_project_id, key) VALUES ($1, $2) \
             ON CONFLICT (permitted_project_id) DO UPDATE SET key = EXCLUDED.key",
            &[&api_key.permitted_project_id, &api_key.key],
        )?;
        Ok(())
    }
}

impl GrantStore for PgUnitOfWork {
    fn create_project(&mut self, project: &Project) -> StoreResult<()> {
        self.execute(
            "create project",
            "INSERT INTO project (id, created_at, user_id, name, description) \
             VALUES ($1, $2, $3, $4, $5)",
            &[
                &project.id,
                &project.created_at,
                &project.user_id,
                &project.name,
                &project.description,
            ],
        )?;
        Ok(())
    }

    fn create_permitted_project(&mut self, grant: &PermittedProject) -> StoreResult<()> {
        self.execute(
            "create permitted project",
            "INSERT INTO permitted_project (id, user_id, project_id) VALUES ($1, $2, $3)",
            &[&grant.id, &grant.user_id, &grant.project_id],
        )?;
        Ok(())
    }

    fn find_permitted_project(
        &mut self,
        user_id: &str,
        project_id: &str,
    ) -> StoreResult<PermittedProject> {
        self.query_one(
            "find permitted project",
            "permitted project",
            "SELECT id, user_id, project_id FROM permitted_project \
             WHERE user_id = $1 AND project_id = $2",
            &[&user_id, &project_id],
            rows::permitted_project,
        )
    }

    fn create_org(&mut self, org: &Org) -> StoreResult<()> {
        self.execute(
            "create org",
            "INSERT INTO org (id, created_at, owner, name, description, location_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &org.id,
                &org.created_at,
                &org.owner,
                &org.name,
                &org.description,
                &org.location_id,
            ],
        )?;
        Ok(())
    }

    fn create_membership(&mut self, membership: &Membership) -> StoreResult<()> {
        self.execute(
            "create membership",
            "INSERT INTO user_org (id, user_id, org_id, level) VALUES ($1, $2, $3, $4)",
            &[
                &membership.id,
                &membership.user_id,
                &membership.org_id,
                &membership.level,
            ],
        )?;
        Ok(())
    }

    fn find_membership(&mut self, user_id: &str, org_id: &str) -> StoreResult<Membership> {
        self.query_one(
            "find membership",
            "membership",
            "SELECT id, user_id, org_id, level FROM user_org WHERE user_id = $1 AND org_id = $2",
            &[&user_id, &org_id],
            rows::membership,
        )
    }

    fn query_orgs(&mut self, query: &FilteredQuery) -> StoreResult<Vec<Org>> {
        self.query_filtered("query orgs", query, rows::org)
    }
}

impl RecordStore for PgUnitOfWork {
    fn create_log(&mut self, record: &LogRecord) -> StoreResult<()> {
        self.execute(
            "create log",
            "INSERT INTO log (id, created_at, user_id, project_id, level_id, process_id, \
             message, traceback, org_id) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            &[
                &record.id,
                &record.created_at,
                &record.user_id,
                &record.project_id,
                &record.level_id,
                &record.process_id,
                &record.message,
                &record.traceback,
                &record.org_id,
            ],
        )?;
        Ok(())
    }

    fn query_logs(&mut self, query: &FilteredQuery) -> StoreResult<Vec<LogRecord>> {
        self.query_filtered("query logs", query, rows::log_record)
    }

    fn create_project_invite(&mut self, invite: &ProjectInvite) -> StoreResult<()> {
        self.execute(
            "create project invite",
            "INSERT INTO project_invite (id, created_at, from_user_id, to_user_id, project_id, \
             status) VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &invite.id,
                &invite.created_at,
                &invite.from_user_id,
                &invite.to_user_id,
                &invite.project_id,
                &invite.status,
            ],
        )?;
        Ok(())
    }

    fn query_project_invites(
        &mut self,
        query: &FilteredQuery,
    ) -> StoreResult<Vec<ProjectInvite>> {
        self.query_filtered("query project invites", query, rows::project_invite)
    }

    fn create_org_invite(&mut self, invite: &OrgInvite) -> StoreResult<()> {
        self.execute(
            "create org invite",
            "INSERT INTO org_invite (id, created_at, from_user_id, to_user_id, org_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &invite.id,
                &invite.created_at,
                &invite.from_user_id,
                &invite.to_user_id,
                &invite.org_id,
                &invite.status,
            ],
        )?;
        Ok(())
    }

    fn query_org_invites(&mut self, query: &FilteredQuery) -> StoreResult<Vec<OrgInvite>> {
        self.query_filtered("query org invites", query, rows::org_invite)
    }
}

impl UnitOfWork for PgUnitOfWork {
    fn commit(mut self: Box<Self>) -> StoreResult<()> {
        self.finish("COMMIT")
    }

    fn rollback(mut self: Box<Self>) -> StoreResult<()> {
        self.finish("ROLLBACK")
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn postgres_store_factory(config: &StoreProviderConfig) -> Result<Arc<dyn StoreProvider>, String> {
    PostgresStore::connect(config)
        .map(|store| Arc::new(store) as Arc<dyn StoreProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(STORE_PROVIDERS)]
static POSTGRES_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: POSTGRES_PROVIDER_NAME,
    description: "PostgreSQL store (r2d2 pool, transactional)",
    factory: postgres_store_factory,
};
