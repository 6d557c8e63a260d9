//! Services wired around a shared in-memory store and manual clock

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use everylog_application::{
    InviteService, LogService, MutationOrchestrator, NewProject, NewUser, OrgService,
    PermissionResolver, ProjectService, SessionTokenAuthority, UserService,
};
use everylog_infrastructure::clock::ManualClock;
use everylog_infrastructure::crypto::{JwtSessionCodec, RandomApiKeyGenerator};
use everylog_providers::MemoryStore;

pub const SECRET: &str = "0123456789abcdef0123456789abcdef";
pub const PASSWORD: &str = "hunter2";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub struct Fixture {
    pub store: MemoryStore,
    pub clock: Arc<ManualClock>,
    pub orchestrator: MutationOrchestrator,
    pub sessions: SessionTokenAuthority,
    pub permissions: PermissionResolver,
    pub users: UserService,
    pub projects: ProjectService,
    pub orgs: OrgService,
    pub logs: LogService,
    pub invites: InviteService,
}

pub fn fixture() -> Fixture {
    let store = MemoryStore::new();
    let clock = Arc::new(ManualClock::new(start_time()));
    let orchestrator = MutationOrchestrator::new(Arc::new(store.clone()));

    Fixture {
        sessions: sessions_with_secret(&orchestrator, &clock, SECRET),
        permissions: PermissionResolver::new(orchestrator.clone()),
        users: UserService::new(orchestrator.clone(), clock.clone()),
        projects: ProjectService::new(
            orchestrator.clone(),
            Arc::new(RandomApiKeyGenerator::new(32)),
            clock.clone(),
        ),
        orgs: OrgService::new(orchestrator.clone(), clock.clone()),
        logs: LogService::new(orchestrator.clone(), clock.clone()),
        invites: InviteService::new(orchestrator.clone(), clock.clone()),
        orchestrator,
        store,
        clock,
    }
}

/// Session authority sharing the fixture's store but signing with `secret`
pub fn sessions_with_secret(
    orchestrator: &MutationOrchestrator,
    clock: &Arc<ManualClock>,
    secret: &str,
) -> SessionTokenAuthority {
    SessionTokenAuthority::new(
        orchestrator.clone(),
        Arc::new(JwtSessionCodec::new(secret)),
        clock.clone(),
        Duration::minutes(60),
    )
}

impl Fixture {
    pub fn register(&self, email: &str) -> String {
        self.users
            .create_user(&NewUser {
                email: email.to_string(),
                first_name: "Test".to_string(),
                last_name: None,
                password: PASSWORD.to_string(),
            })
            .unwrap_or_else(|e| panic!("Expected user {email}, got {e}"))
    }

    pub fn create_project(&self, user_id: &str, name: &str) -> String {
        self.projects
            .create_project(
                user_id,
                &NewProject {
                    name: name.to_string(),
                    description: None,
                },
            )
            .unwrap_or_else(|e| panic!("Expected project {name}, got {e}"))
            .id
    }

    pub fn issue_key(&self, user_id: &str, project_id: &str) -> String {
        self.projects
            .issue_api_key(user_id, project_id)
            .unwrap_or_else(|e| panic!("Expected api key, got {e}"))
            .key
    }
}
