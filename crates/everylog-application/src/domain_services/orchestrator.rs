//! Mutation Orchestrator
//!
//! Runs a sequence of store steps inside one unit of work. Steps either all
//! commit or leave no trace. A step may fail with a raw store error (which
//! is classified here) or with a domain error (which passes through).

use std::sync::Arc;

use everylog_domain::error::{Error, Result};
use everylog_domain::ports::{StoreError, StoreProvider, UnitOfWork};
use tracing::{debug, error, warn};

/// Failure raised by a step
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Domain(#[from] Error),
}

/// Result type for steps run by the orchestrator
pub type StepResult<T> = std::result::Result<T, StepError>;

/// Runs compound writes atomically against an injected store
#[derive(Clone)]
pub struct MutationOrchestrator {
    store: Arc<dyn StoreProvider>,
}

impl MutationOrchestrator {
    pub fn new(store: Arc<dyn StoreProvider>) -> Self {
        Self { store }
    }

    /// The store this orchestrator opens units of work on
    pub fn store(&self) -> &Arc<dyn StoreProvider> {
        &self.store
    }

    /// Run `steps` atomically
    ///
    /// `resource` names what a uniqueness violation means to the caller,
    /// e.g. `"project"` yields `Error::AlreadyExists { resource: "project" }`.
    pub fn run_atomic<T, F>(&self, resource: &str, steps: F) -> Result<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> StepResult<T>,
    {
        let mut uow = self.begin()?;

        match steps(uow.as_mut()) {
            Ok(value) => {
                uow.commit().map_err(|e| {
                    error!(error = %e, resource, "Failed to commit unit of work");
                    Error::storage_with_source("failed to commit", e)
                })?;
                debug!(resource, "Committed unit of work");
                Ok(value)
            }
            Err(step_error) => {
                if let Err(rollback_error) = uow.rollback() {
                    error!(
                        error = %rollback_error,
                        step_error = %step_error,
                        resource,
                        "Failed to roll back unit of work"
                    );
                    return Err(Error::storage_with_source(
                        "failed to roll back",
                        rollback_error,
                    ));
                }
                Err(classify(resource, step_error))
            }
        }
    }

    /// Run read-only `steps`; the unit of work is always rolled back
    pub fn read<T, F>(&self, steps: F) -> Result<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> StepResult<T>,
    {
        let mut uow = self.begin()?;
        let outcome = steps(uow.as_mut());

        if let Err(e) = uow.rollback() {
            warn!(error = %e, "Failed to release read-only unit of work");
        }

        outcome.map_err(|e| classify("record", e))
    }

    fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        self.store.begin().map_err(|e| {
            error!(error = %e, provider = self.store.provider_name(), "Failed to open unit of work");
            Error::storage_with_source("failed to open unit of work", e)
        })
    }
}

/// Map a step failure onto the caller-facing taxonomy
fn classify(resource: &str, step_error: StepError) -> Error {
    match step_error {
        StepError::Domain(e) => e,
        StepError::Store(StoreError::UniqueViolation { constraint }) => {
            debug!(constraint = %constraint, resource, "Uniqueness violation");
            Error::already_exists(resource)
        }
        StepError::Store(e) => {
            error!(error = %e, resource, "Store operation failed");
            Error::storage_with_source(format!("{resource} operation failed"), e)
        }
    }
}
