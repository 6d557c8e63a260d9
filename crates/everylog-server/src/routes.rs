//! Route table
//!
//! | Method | Path | Credential |
//! |--------|------|------------|
//! | POST | `/user` | none |
//! | POST | `/authenticate` | user id + password |
//! | POST | `/authorize` | user id + session token |
//! | POST | `/project` | session |
//! | POST | `/project/<id>/key` | session |
//! | POST | `/project/<id>/invite` | user id + API key |
//! | POST | `/log` | user id + API key |
//! | GET | `/log` | session |
//! | POST | `/org` | session |
//! | GET | `/org` | session |
//! | POST | `/org/<id>/invite` | session |
//! | GET | `/invite/project` | session |
//! | GET | `/invite/org` | session |
//! | GET | `/health` | none |

use everylog_infrastructure::AppContext;
use rocket::{Build, Rocket, routes};

use crate::error::error_catchers;
use crate::handlers::{health, invites, logs, orgs, projects, users};

/// Build the Rocket application around a wired context
pub fn everylog_rocket(context: AppContext) -> Rocket<Build> {
    rocket::build()
        .manage(context)
        .mount(
            "/",
            routes![
                users::create_user,
                users::authenticate,
                users::authorize,
                projects::create_project,
                projects::issue_api_key,
                projects::create_project_invite,
                logs::create_log,
                logs::list_logs,
                orgs::create_org,
                orgs::list_orgs,
                orgs::create_org_invite,
                invites::list_project_invites,
                invites::list_org_invites,
                health::health,
            ],
        )
        .register("/", error_catchers())
}
