//! Log ingestion and listing

use std::sync::Arc;

use everylog_domain::entities::LogRecord;
use everylog_domain::error::{Error, Result};
use everylog_domain::ports::Clock;
use everylog_domain::value_objects::{Credential, LogFilter};
use tracing::{debug, warn};

use super::{new_id, require};
use crate::domain_services::{MutationOrchestrator, log_listing, resolve_grant_in};

/// Log record as submitted by a producer
#[derive(Debug, Clone, Default)]
pub struct NewLogRecord {
    pub project_id: String,
    pub level_id: i32,
    pub process_id: Option<String>,
    pub message: String,
    pub traceback: Option<String>,
    pub org_id: Option<String>,
}

#[derive(Clone)]
pub struct LogService {
    orchestrator: MutationOrchestrator,
    clock: Arc<dyn Clock>,
}

impl LogService {
    pub fn new(orchestrator: MutationOrchestrator, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator,
            clock,
        }
    }

    /// Write a record through an API key
    ///
    /// The key must belong to `user_id` and be bound to the record's project.
    pub fn create_log(
        &self,
        user_id: &str,
        api_key: &str,
        input: &NewLogRecord,
    ) -> Result<LogRecord> {
        if api_key.trim().is_empty() {
            return Err(Error::missing_credential("Api key"));
        }
        require("project_id", &input.project_id)?;
        require("message", &input.message)?;

        let record = LogRecord {
            id: new_id(),
            created_at: self.clock.now(),
            user_id: user_id.to_string(),
            project_id: input.project_id.clone(),
            level_id: input.level_id,
            process_id: input.process_id.clone(),
            message: input.message.clone(),
            traceback: input.traceback.clone(),
            org_id: input.org_id.clone(),
        };

        self.orchestrator.run_atomic("log", |uow| {
            let grant = resolve_grant_in(uow, user_id, &Credential::ApiKey(api_key.to_string()))?;
            if grant.project_id != record.project_id {
                warn!(
                    user_id,
                    project_id = %record.project_id,
                    "API key is bound to a different project"
                );
                return Err(Error::Unauthorized.into());
            }
            uow.create_log(&record)?;
            Ok(())
        })?;

        debug!(user_id, log_id = %record.id, "Wrote log record");
        Ok(record)
    }

    /// Records written by `user_id`
    pub fn list_logs(&self, user_id: &str, filter: &LogFilter) -> Result<Vec<LogRecord>> {
        let query = log_listing(user_id, filter);
        self.orchestrator.read(|uow| Ok(uow.query_logs(&query)?))
    }
}
