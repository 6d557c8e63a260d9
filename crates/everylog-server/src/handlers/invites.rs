//! Invite listing endpoints
//!
//! Both listings return invites the caller sent or received.

use everylog_domain::entities::{OrgInvite, ProjectInvite};
use everylog_infrastructure::AppContext;
use rocket::serde::json::Json;
use rocket::{State, get};

use super::run_blocking;
use crate::error::ApiError;
use crate::guards::Session;
use crate::models::InviteQuery;

/// `GET /invite/project`
#[get("/invite/project?<query..>")]
pub async fn list_project_invites(
    session: Session,
    query: InviteQuery,
    context: &State<AppContext>,
) -> Result<Json<Vec<ProjectInvite>>, ApiError> {
    let filter = query.into_project_filter()?;
    let invites = run_blocking(context, move |ctx| {
        ctx.invites().list_project_invites(&session.user_id, &filter)
    })
    .await?;
    Ok(Json(invites))
}

/// `GET /invite/org`
#[get("/invite/org?<query..>")]
pub async fn list_org_invites(
    session: Session,
    query: InviteQuery,
    context: &State<AppContext>,
) -> Result<Json<Vec<OrgInvite>>, ApiError> {
    let filter = query.into_org_filter()?;
    let invites = run_blocking(context, move |ctx| {
        ctx.invites().list_org_invites(&session.user_id, &filter)
    })
    .await?;
    Ok(Json(invites))
}
