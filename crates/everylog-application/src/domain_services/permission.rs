//! Permission Resolver
//!
//! Maps `(caller, credential)` to the grant the caller may act through.
//! Fail-closed: every failure is an error, nothing is ever downgraded to an
//! allow, and every check re-reads the store.

use everylog_domain::error::{Error, Result};
use everylog_domain::ports::UnitOfWork;
use everylog_domain::value_objects::{Credential, Grant};
use tracing::{debug, warn};

use super::orchestrator::MutationOrchestrator;

/// Resolves grants in their own read-only unit of work
#[derive(Clone)]
pub struct PermissionResolver {
    orchestrator: MutationOrchestrator,
}

impl PermissionResolver {
    pub fn new(orchestrator: MutationOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Resolve `credential` for `caller`
    pub fn resolve_grant(&self, caller: &str, credential: &Credential) -> Result<Grant> {
        self.orchestrator
            .read(|uow| Ok(resolve_grant_in(uow, caller, credential)?))
    }
}

/// Resolve `credential` for `caller` inside an open unit of work
///
/// - Project path: a grant for `(caller, project)` must exist. An absent
///   grant is reported as `Error::Storage`.
/// - API key path: the key must exist (else `Error::Storage`) and its grant
///   must belong to `caller` (else `Error::Unauthorized`).
pub fn resolve_grant_in(
    uow: &mut dyn UnitOfWork,
    caller: &str,
    credential: &Credential,
) -> Result<Grant> {
    let grant = match credential {
        Credential::Project(project_id) => {
            let permitted = uow
                .find_permitted_project(caller, project_id)
                .map_err(|e| {
                    warn!(error = %e, caller, project_id = %project_id, "Grant lookup failed");
                    Error::storage_with_source("failed to read permitted project", e)
                })?;
            Grant {
                permitted_project_id: permitted.id,
                user_id: permitted.user_id,
                project_id: permitted.project_id,
            }
        }
        Credential::ApiKey(key) => {
            let grant = uow.find_api_key_grant(key).map_err(|e| {
                warn!(error = %e, caller, "API key lookup failed");
                Error::storage_with_source("failed to read api key", e)
            })?;
            if grant.user_id != caller {
                warn!(
                    caller,
                    permitted_project_id = %grant.permitted_project_id,
                    "API key presented by a user who does not own it"
                );
                return Err(Error::Unauthorized);
            }
            grant
        }
    };

    debug!(
        caller,
        credential = credential.kind(),
        permitted_project_id = %grant.permitted_project_id,
        "Resolved grant"
    );
    Ok(grant)
}
