//! Projects and API key issuance

use std::sync::Arc;

use everylog_domain::entities::{ApiKey, PermittedProject, Project};
use everylog_domain::error::{Error, Result};
use everylog_domain::ports::{ApiKeyGenerator, Clock};
use everylog_domain::value_objects::Credential;
use tracing::{info, warn};

use super::{new_id, require};
use crate::domain_services::{MutationOrchestrator, resolve_grant_in};

/// Project creation input
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

/// Creates projects and rotates their API keys
#[derive(Clone)]
pub struct ProjectService {
    orchestrator: MutationOrchestrator,
    keys: Arc<dyn ApiKeyGenerator>,
    clock: Arc<dyn Clock>,
}

impl ProjectService {
    pub fn new(
        orchestrator: MutationOrchestrator,
        keys: Arc<dyn ApiKeyGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orchestrator,
            keys,
            clock,
        }
    }

    /// Create a project and the creator's grant on it
    pub fn create_project(&self, user_id: &str, input: &NewProject) -> Result<Project> {
        require("name", &input.name)?;

        let project = Project {
            id: new_id(),
            created_at: self.clock.now(),
            user_id: user_id.to_string(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
        };
        let grant = PermittedProject {
            id: new_id(),
            user_id: user_id.to_string(),
            project_id: project.id.clone(),
        };

        self.orchestrator.run_atomic("project", |uow| {
            uow.create_project(&project)?;
            uow.create_permitted_project(&grant)?;
            Ok(())
        })?;

        info!(user_id, project_id = %project.id, "Created project");
        Ok(project)
    }

    /// Issue a fresh key for the caller's grant on `project_id`
    ///
    /// Overwrites the previous key, which stops resolving immediately. Any
    /// failure to find the grant is reported as `Unauthorized`.
    pub fn issue_api_key(&self, user_id: &str, project_id: &str) -> Result<ApiKey> {
        require("project_id", project_id)?;

        let api_key = self.orchestrator.run_atomic("api key", |uow| {
            let grant =
                resolve_grant_in(uow, user_id, &Credential::Project(project_id.to_string()))
                    .map_err(|e| {
                        warn!(error = %e, user_id, project_id, "No grant for key issuance");
                        Error::Unauthorized
                    })?;

            let api_key = ApiKey {
                permitted_project_id: grant.permitted_project_id,
                key: self.keys.generate()?,
            };
            uow.upsert_api_key(&api_key)?;
            Ok(api_key)
        })?;

        info!(user_id, project_id, "Issued api key");
        Ok(api_key)
    }
}
