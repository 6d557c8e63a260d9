//! Organization endpoints

use everylog_application::NewOrg;
use everylog_domain::entities::Org;
use everylog_infrastructure::AppContext;
use rocket::serde::json::Json;
use rocket::{State, get, post};

use super::run_blocking;
use crate::error::ApiError;
use crate::guards::Session;
use crate::models::{CreateInviteRequest, CreateOrgRequest, IdResponse, OrgQuery, validated};

/// `POST /org` - create an organization owned by the caller
#[post("/org", format = "json", data = "<request>")]
pub async fn create_org(
    session: Session,
    request: Json<CreateOrgRequest>,
    context: &State<AppContext>,
) -> Result<Json<IdResponse>, ApiError> {
    let input: NewOrg = validated(request.into_inner())?.into();
    let org = run_blocking(context, move |ctx| {
        ctx.orgs().create_org(&session.user_id, &input)
    })
    .await?;
    Ok(Json(IdResponse { id: org.id }))
}

/// `GET /org` - organizations the caller belongs to
#[get("/org?<query..>")]
pub async fn list_orgs(
    session: Session,
    query: OrgQuery,
    context: &State<AppContext>,
) -> Result<Json<Vec<Org>>, ApiError> {
    let filter = query.into_filter()?;
    let orgs = run_blocking(context, move |ctx| {
        ctx.orgs().list_orgs(&session.user_id, &filter)
    })
    .await?;
    Ok(Json(orgs))
}

/// `POST /org/<org_id>/invite` - invite a user to an organization
///
/// The caller must be a member of the organization.
#[post("/org/<org_id>/invite", format = "json", data = "<request>")]
pub async fn create_org_invite(
    session: Session,
    org_id: &str,
    request: Json<CreateInviteRequest>,
    context: &State<AppContext>,
) -> Result<Json<IdResponse>, ApiError> {
    let invite = validated(request.into_inner())?.into_invite(org_id);
    let created = run_blocking(context, move |ctx| {
        ctx.invites().create_org_invite(&session.user_id, &invite)
    })
    .await?;
    Ok(Json(IdResponse { id: created.id }))
}
