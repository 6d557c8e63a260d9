//! Request and response bodies
//!
//! Request bodies default every absent field, so a missing required field
//! is reported by validation as `MissingRequiredField` rather than as a
//! decoding failure. Listing filters arrive as query strings; timestamps are
//! RFC 3339.

use chrono::{DateTime, Utc};
use everylog_application::{NewInvite, NewLogRecord, NewOrg, NewProject, NewUser};
use everylog_domain::error::{Error, Result};
use everylog_domain::value_objects::{InviteFilter, LogFilter, OrgFilter};
use rocket::FromForm;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reject `input` when a field fails validation
///
/// Several failing fields report the alphabetically first one.
pub fn validated<T: Validate>(input: T) -> Result<T> {
    if let Err(errors) = input.validate() {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        return Err(fields.into_iter().next().map_or_else(
            || Error::internal("Validation failed without a field"),
            Error::missing_field,
        ));
    }
    Ok(input)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[validate(length(min = 1))]
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        }
    }
}

/// `email` is accepted for compatibility and ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthenticateRequest {
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorizeRequest {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(request: CreateProjectRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateLogRequest {
    #[validate(length(min = 1))]
    pub project_id: String,
    pub level_id: i32,
    pub process_id: Option<String>,
    #[validate(length(min = 1))]
    pub message: String,
    pub traceback: Option<String>,
    pub org_id: Option<String>,
}

impl From<CreateLogRequest> for NewLogRecord {
    fn from(request: CreateLogRequest) -> Self {
        Self {
            project_id: request.project_id,
            level_id: request.level_id,
            process_id: request.process_id,
            message: request.message,
            traceback: request.traceback,
            org_id: request.org_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateOrgRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub location_id: Option<String>,
}

impl From<CreateOrgRequest> for NewOrg {
    fn from(request: CreateOrgRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            location_id: request.location_id,
        }
    }
}

/// Invite body; the project or org comes from the path
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateInviteRequest {
    #[validate(length(min = 1))]
    pub to_user_id: String,
}

impl CreateInviteRequest {
    pub fn into_invite(self, target_id: &str) -> NewInvite {
        NewInvite {
            to_user_id: self.to_user_id,
            target_id: target_id.to_string(),
        }
    }
}

// ============================================================================
// Listing filters
// ============================================================================

fn timestamp(field: &str, value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|e| Error::encoding_with_source(format!("Invalid {field} timestamp"), e))
        })
        .transpose()
}

#[derive(Debug, Clone, Default, FromForm)]
pub struct LogQuery {
    pub project_id: Option<String>,
    pub level_id: Option<String>,
    pub process_id: Option<String>,
    pub org_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl LogQuery {
    pub fn into_filter(self) -> Result<LogFilter> {
        let level_id = self
            .level_id
            .map(|raw| {
                raw.trim()
                    .parse::<i32>()
                    .map_err(|e| Error::encoding_with_source("Invalid level_id", e))
            })
            .transpose()?;

        Ok(LogFilter {
            project_id: self.project_id,
            level_id,
            process_id: self.process_id,
            org_id: self.org_id,
            from: timestamp("from", self.from)?,
            to: timestamp("to", self.to)?,
        })
    }
}

#[derive(Debug, Clone, Default, FromForm)]
pub struct OrgQuery {
    pub org_id: Option<String>,
    pub name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl OrgQuery {
    pub fn into_filter(self) -> Result<OrgFilter> {
        Ok(OrgFilter {
            org_id: self.org_id,
            name: self.name,
            from: timestamp("from", self.from)?,
            to: timestamp("to", self.to)?,
        })
    }
}

/// Invite listing filter; `project_id` applies to project invites and
/// `org_id` to org invites
#[derive(Debug, Clone, Default, FromForm)]
pub struct InviteQuery {
    pub project_id: Option<String>,
    pub org_id: Option<String>,
    pub status: Option<String>,
    pub from_user_id: Option<String>,
    pub to_user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl InviteQuery {
    pub fn into_project_filter(self) -> Result<InviteFilter> {
        let target_id = self.project_id.clone();
        self.into_filter(target_id)
    }

    pub fn into_org_filter(self) -> Result<InviteFilter> {
        let target_id = self.org_id.clone();
        self.into_filter(target_id)
    }

    fn into_filter(self, target_id: Option<String>) -> Result<InviteFilter> {
        Ok(InviteFilter {
            target_id,
            status: self.status,
            from_user_id: self.from_user_id,
            to_user_id: self.to_user_id,
            from: timestamp("from", self.from)?,
            to: timestamp("to", self.to)?,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResponse {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
}
