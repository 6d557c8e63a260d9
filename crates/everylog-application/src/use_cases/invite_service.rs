//! Project and organization invites

use std::sync::Arc;

use everylog_domain::constants::INVITE_STATUS_PENDING;
use everylog_domain::entities::{OrgInvite, ProjectInvite};
use everylog_domain::error::{Error, Result};
use everylog_domain::ports::{Clock, StoreError};
use everylog_domain::value_objects::{Credential, InviteFilter};
use tracing::{info, warn};

use super::{new_id, require};
use crate::domain_services::{
    MutationOrchestrator, org_invite_listing, project_invite_listing, resolve_grant_in,
};

/// Invite input; `target_id` is the project id or org id
#[derive(Debug, Clone, Default)]
pub struct NewInvite {
    pub to_user_id: String,
    pub target_id: String,
}

#[derive(Clone)]
pub struct InviteService {
    orchestrator: MutationOrchestrator,
    clock: Arc<dyn Clock>,
}

impl InviteService {
    pub fn new(orchestrator: MutationOrchestrator, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator,
            clock,
        }
    }

    /// Invite `to_user_id` to a project the inviter holds an API key for
    pub fn create_project_invite(
        &self,
        from_user_id: &str,
        api_key: &str,
        input: &NewInvite,
    ) -> Result<ProjectInvite> {
        if api_key.trim().is_empty() {
            return Err(Error::missing_credential("Api key"));
        }
        require("to_user_id", &input.to_user_id)?;
        require("project_id", &input.target_id)?;

        let invite = ProjectInvite {
            id: new_id(),
            created_at: self.clock.now(),
            from_user_id: from_user_id.to_string(),
            to_user_id: input.to_user_id.clone(),
            project_id: input.target_id.clone(),
            status: INVITE_STATUS_PENDING.to_string(),
        };
        let resource = format!(
            "invite from {} to {} for project {}",
            invite.from_user_id, invite.to_user_id, invite.project_id
        );

        self.orchestrator.run_atomic(&resource, |uow| {
            let grant =
                resolve_grant_in(uow, from_user_id, &Credential::ApiKey(api_key.to_string()))?;
            if grant.project_id != invite.project_id {
                warn!(
                    from_user_id,
                    project_id = %invite.project_id,
                    "API key is bound to a different project"
                );
                return Err(Error::Unauthorized.into());
            }
            uow.create_project_invite(&invite)?;
            Ok(())
        })?;

        info!(invite_id = %invite.id, project_id = %invite.project_id, "Created project invite");
        Ok(invite)
    }

    /// Invite `to_user_id` to an organization the inviter is a member of
    pub fn create_org_invite(&self, from_user_id: &str, input: &NewInvite) -> Result<OrgInvite> {
        require("to_user_id", &input.to_user_id)?;
        require("org_id", &input.target_id)?;

        let invite = OrgInvite {
            id: new_id(),
            created_at: self.clock.now(),
            from_user_id: from_user_id.to_string(),
            to_user_id: input.to_user_id.clone(),
            org_id: input.target_id.clone(),
            status: INVITE_STATUS_PENDING.to_string(),
        };
        let resource = format!(
            "invite from {} to {} for org {}",
            invite.from_user_id, invite.to_user_id, invite.org_id
        );

        self.orchestrator.run_atomic(&resource, |uow| {
            match uow.find_membership(from_user_id, &invite.org_id) {
                Ok(_) => {}
                Err(StoreError::NotFound { .. }) => {
                    warn!(from_user_id, org_id = %invite.org_id, "Inviter is not a member");
                    return Err(Error::Unauthorized.into());
                }
                Err(e) => return Err(e.into()),
            }
            uow.create_org_invite(&invite)?;
            Ok(())
        })?;

        info!(invite_id = %invite.id, org_id = %invite.org_id, "Created org invite");
        Ok(invite)
    }

    /// Project invites `user_id` sent or received
    pub fn list_project_invites(
        &self,
        user_id: &str,
        filter: &InviteFilter,
    ) -> Result<Vec<ProjectInvite>> {
        let query = project_invite_listing(user_id, filter);
        self.orchestrator
            .read(|uow| Ok(uow.query_project_invites(&query)?))
    }

    /// Org invites `user_id` sent or received
    pub fn list_org_invites(&self, user_id: &str, filter: &InviteFilter) -> Result<Vec<OrgInvite>> {
        let query = org_invite_listing(user_id, filter);
        self.orchestrator.read(|uow| Ok(uow.query_org_invites(&query)?))
    }
}
