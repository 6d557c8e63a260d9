//! Organizations

use std::sync::Arc;

use everylog_domain::constants::ORG_OWNER_LEVEL;
use everylog_domain::entities::{Membership, Org};
use everylog_domain::error::Result;
use everylog_domain::ports::Clock;
use everylog_domain::value_objects::OrgFilter;
use tracing::info;

use super::{new_id, require};
use crate::domain_services::{MutationOrchestrator, org_listing};

/// Organization creation input
#[derive(Debug, Clone, Default)]
pub struct NewOrg {
    pub name: String,
    pub description: Option<String>,
    pub location_id: Option<String>,
}

#[derive(Clone)]
pub struct OrgService {
    orchestrator: MutationOrchestrator,
    clock: Arc<dyn Clock>,
}

impl OrgService {
    pub fn new(orchestrator: MutationOrchestrator, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator,
            clock,
        }
    }

    /// Create an organization owned by `user_id` with an owner membership
    pub fn create_org(&self, user_id: &str, input: &NewOrg) -> Result<Org> {
        require("name", &input.name)?;

        let org = Org {
            id: new_id(),
            created_at: self.clock.now(),
            owner: user_id.to_string(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            location_id: input.location_id.clone(),
        };
        let membership = Membership {
            id: new_id(),
            user_id: user_id.to_string(),
            org_id: org.id.clone(),
            level: ORG_OWNER_LEVEL,
        };

        self.orchestrator.run_atomic("org", |uow| {
            uow.create_org(&org)?;
            uow.create_membership(&membership)?;
            Ok(())
        })?;

        info!(user_id, org_id = %org.id, "Created org");
        Ok(org)
    }

    /// Organizations `user_id` is a member of
    pub fn list_orgs(&self, user_id: &str, filter: &OrgFilter) -> Result<Vec<Org>> {
        let query = org_listing(user_id, filter);
        self.orchestrator.read(|uow| Ok(uow.query_orgs(&query)?))
    }
}
