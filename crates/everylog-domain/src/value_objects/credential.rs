use serde::{Deserialize, Serialize};

/// What a caller presents to act on a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A project id; the caller must hold a grant on it
    Project(String),
    /// An API key; the caller must own the grant the key is bound to
    ApiKey(String),
}

impl Credential {
    /// Short label for logs, never the key material itself
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::ApiKey(_) => "api_key",
        }
    }
}

/// A resolved permission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub permitted_project_id: String,
    pub user_id: String,
    pub project_id: String,
}
