//! Composition root
//!
//! Builds every service from an [`AppConfig`]. The store provider is
//! resolved by name through the link-time registry; everything else is
//! constructed directly and injected.
//!
//! ```text
//! AppConfig → STORE_PROVIDERS → Arc<dyn StoreProvider> → MutationOrchestrator
//!                                                     ↘ services (users, projects, ...)
//! ```

use std::sync::Arc;

use chrono::Duration;
use everylog_application::ports::resolve_store_provider;
use everylog_application::{
    InviteService, LogService, MutationOrchestrator, OrgService, PermissionResolver,
    ProjectService, SessionTokenAuthority, UserService,
};
use everylog_domain::error::{Error, Result};
use everylog_domain::ports::{Clock, StoreProvider};
use tracing::info;

use crate::clock::SystemClock;
use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::crypto::{JwtSessionCodec, RandomApiKeyGenerator};

// Linked for its registry entries in STORE_PROVIDERS
extern crate everylog_providers;

/// Application context holding every wired service
#[derive(Clone)]
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    store: Arc<dyn StoreProvider>,
    clock: Arc<dyn Clock>,
    permissions: PermissionResolver,
    sessions: SessionTokenAuthority,
    users: UserService,
    projects: ProjectService,
    orgs: OrgService,
    logs: LogService,
    invites: InviteService,
}

impl AppContext {
    pub fn store(&self) -> Arc<dyn StoreProvider> {
        Arc::clone(&self.store)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn permissions(&self) -> &PermissionResolver {
        &self.permissions
    }

    pub fn sessions(&self) -> &SessionTokenAuthority {
        &self.sessions
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn projects(&self) -> &ProjectService {
        &self.projects
    }

    pub fn orgs(&self) -> &OrgService {
        &self.orgs
    }

    pub fn logs(&self) -> &LogService {
        &self.logs
    }

    pub fn invites(&self) -> &InviteService {
        &self.invites
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store.provider_name())
            .field("server", &self.config.server)
            .finish_non_exhaustive()
    }
}

/// Resolve the configured store provider and wire every service
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    let provider_config = config.database.to_provider_config();
    let store = resolve_store_provider(&provider_config).map_err(Error::configuration)?;
    init_app_with_store(config, store, Arc::new(SystemClock))
}

/// Wire every service around an existing store and clock
pub fn init_app_with_store(
    config: AppConfig,
    store: Arc<dyn StoreProvider>,
    clock: Arc<dyn Clock>,
) -> Result<AppContext> {
    validate_app_config(&config)?;

    let lifetime = i64::try_from(config.auth.jwt.expiration_secs)
        .map(Duration::seconds)
        .map_err(|_| Error::configuration("JWT expiration is out of range"))?;

    let orchestrator = MutationOrchestrator::new(Arc::clone(&store));
    let codec = Arc::new(JwtSessionCodec::new(&config.auth.jwt.secret));
    let keys = Arc::new(RandomApiKeyGenerator::new(config.auth.api_key.length));

    info!(
        provider = store.provider_name(),
        session_lifetime_secs = config.auth.jwt.expiration_secs,
        "Application context initialized"
    );

    Ok(AppContext {
        permissions: PermissionResolver::new(orchestrator.clone()),
        sessions: SessionTokenAuthority::new(
            orchestrator.clone(),
            codec,
            Arc::clone(&clock),
            lifetime,
        ),
        users: UserService::new(orchestrator.clone(), Arc::clone(&clock)),
        projects: ProjectService::new(orchestrator.clone(), keys, Arc::clone(&clock)),
        orgs: OrgService::new(orchestrator.clone(), Arc::clone(&clock)),
        logs: LogService::new(orchestrator.clone(), Arc::clone(&clock)),
        invites: InviteService::new(orchestrator, Arc::clone(&clock)),
        config: Arc::new(config),
        store,
        clock,
    })
}
