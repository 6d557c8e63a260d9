//! Row decoding
//!
//! Columns are read by name, so the listing statements may select them in
//! any order as long as the names match.

use everylog_domain::entities::{
    LogRecord, Membership, Org, OrgInvite, PermittedProject, ProjectInvite, UserSecret,
};
use everylog_domain::value_objects::Grant;
use postgres::{Error, Row};

pub(super) fn user_secret(row: &Row) -> Result<UserSecret, Error> {
    Ok(UserSecret {
        user_id: row.try_get("id")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
    })
}

pub(super) fn grant(row: &Row) -> Result<Grant, Error> {
    Ok(Grant {
        permitted_project_id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        project_id: row.try_get("project_id")?,
    })
}

pub(super) fn permitted_project(row: &Row) -> Result<PermittedProject, Error> {
    Ok(PermittedProject {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        project_id: row.try_get("project_id")?,
    })
}

pub(super) fn membership(row: &Row) -> Result<Membership, Error> {
    Ok(Membership {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        org_id: row.try_get("org_id")?,
        level: row.try_get("level")?,
    })
}

pub(super) fn org(row: &Row) -> Result<Org, Error> {
    Ok(Org {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        location_id: row.try_get("location_id")?,
    })
}

pub(super) fn log_record(row: &Row) -> Result<LogRecord, Error> {
    Ok(LogRecord {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        user_id: row.try_get("user_id")?,
        project_id: row.try_get("project_id")?,
        level_id: row.try_get("level_id")?,
        process_id: row.try_get("process_id")?,
        message: row.try_get("message")?,
        traceback: row.try_get("traceback")?,
        org_id: row.try_get("org_id")?,
    })
}

pub(super) fn project_invite(row: &Row) -> Result<ProjectInvite, Error> {
    Ok(ProjectInvite {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        from_user_id: row.try_get("from_user_id")?,
        to_user_id: row.try_get("to_user_id")?,
        project_id: row.try_get("project_id")?,
        status: row.try_get("status")?,
    })
}

pub(super) fn org_invite(row: &Row) -> Result<OrgInvite, Error> {
    Ok(OrgInvite {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        from_user_id: row.try_get("from_user_id")?,
        to_user_id: row.try_get("to_user_id")?,
        org_id: row.try_get("org_id")?,
        status: row.try_get("status")?,
    })
}
