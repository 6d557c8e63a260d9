//! User registration

use std::sync::Arc;

use everylog_domain::entities::{User, UserProfile};
use everylog_domain::error::Result;
use everylog_domain::ports::Clock;
use tracing::info;

use super::{new_id, require};
use crate::domain_services::MutationOrchestrator;

/// Registration input
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub password: String,
}

/// Creates users together with their PII profile
#[derive(Clone)]
pub struct UserService {
    orchestrator: MutationOrchestrator,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(orchestrator: MutationOrchestrator, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator,
            clock,
        }
    }

    /// Create the user row, its profile and the link between them
    ///
    /// Returns the new user id. A taken email is `AlreadyExists("email")`
    /// and leaves no user row behind.
    pub fn create_user(&self, input: &NewUser) -> Result<String> {
        require("email", &input.email)?;
        require("first_name", &input.first_name)?;
        require("password", &input.password)?;

        let user = User {
            id: new_id(),
            created_at: self.clock.now(),
            pii_id: None,
        };
        let profile = UserProfile {
            id: new_id(),
            user_id: user.id.clone(),
            email: input.email.trim().to_string(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            password: input.password.clone(),
        };

        let user_id = self.orchestrator.run_atomic("email", |uow| {
            uow.create_user(&user)?;
            uow.create_user_profile(&profile)?;
            uow.link_user_profile(&user.id, &profile.id)?;
            Ok(user.id.clone())
        })?;

        info!(user_id = %user_id, "Created user");
        Ok(user_id)
    }
}
