//! Project endpoints

use everylog_application::NewProject;
use everylog_infrastructure::AppContext;
use rocket::serde::json::Json;
use rocket::{State, post};

use super::run_blocking;
use crate::error::ApiError;
use crate::guards::{ApiKeyHeader, CallerId, Session};
use crate::models::{CreateInviteRequest, CreateProjectRequest, IdResponse, KeyResponse, validated};

/// `POST /project` - create a project and grant it to the caller
#[post("/project", format = "json", data = "<request>")]
pub async fn create_project(
    session: Session,
    request: Json<CreateProjectRequest>,
    context: &State<AppContext>,
) -> Result<Json<IdResponse>, ApiError> {
    let input: NewProject = validated(request.into_inner())?.into();
    let project = run_blocking(context, move |ctx| {
        ctx.projects().create_project(&session.user_id, &input)
    })
    .await?;
    Ok(Json(IdResponse { id: project.id }))
}

/// `POST /project/<project_id>/key` - issue a new API key, replacing the old one
#[post("/project/<project_id>/key")]
pub async fn issue_api_key(
    session: Session,
    project_id: &str,
    context: &State<AppContext>,
) -> Result<Json<KeyResponse>, ApiError> {
    let project_id = project_id.to_string();
    let api_key = run_blocking(context, move |ctx| {
        ctx.projects().issue_api_key(&session.user_id, &project_id)
    })
    .await?;
    Ok(Json(KeyResponse { key: api_key.key }))
}

/// `POST /project/<project_id>/invite` - invite a user to a project
///
/// Authenticated by the caller's API key for that project.
#[post("/project/<project_id>/invite", format = "json", data = "<request>")]
pub async fn create_project_invite(
    caller: CallerId,
    api_key: ApiKeyHeader,
    project_id: &str,
    request: Json<CreateInviteRequest>,
    context: &State<AppContext>,
) -> Result<Json<IdResponse>, ApiError> {
    let invite = validated(request.into_inner())?.into_invite(project_id);
    let CallerId(from_user_id) = caller;
    let ApiKeyHeader(key) = api_key;
    let created = run_blocking(context, move |ctx| {
        ctx.invites()
            .create_project_invite(&from_user_id, &key, &invite)
    })
    .await?;
    Ok(Json(IdResponse { id: created.id }))
}
