//! Request guards
//!
//! The caller id and API key arrive in headers, the session token in a
//! cookie or header. All names come from the `auth` configuration section.
//!
//! ```rust,ignore
//! #[get("/org")]
//! async fn list_orgs(session: Session, context: &State<AppContext>) -> ... {
//!     // session.user_id holds a verified, unexpired session
//! }
//! ```

use chrono::{DateTime, Utc};
use everylog_application::select_presented_token;
use everylog_domain::error::Error;
use everylog_infrastructure::AppContext;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};

use crate::constants::{API_KEY_CREDENTIAL, TOKEN_CREDENTIAL, USER_ID_CREDENTIAL};
use crate::error::reject;
use crate::handlers::run_blocking;

fn app_context<'r>(request: &'r Request<'_>) -> Result<&'r AppContext, Error> {
    request
        .rocket()
        .state::<AppContext>()
        .ok_or_else(|| Error::internal("Application context is not managed"))
}

/// Trimmed, non-empty header value
fn header(request: &Request<'_>, name: &str) -> Option<String> {
    request
        .headers()
        .get_one(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Caller id from the user id header, not yet verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CallerId {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let context = match app_context(request) {
            Ok(context) => context,
            Err(e) => return reject(request, e),
        };

        match header(request, &context.config.auth.user_id_header) {
            Some(user_id) => Outcome::Success(CallerId(user_id)),
            None => reject(request, Error::missing_credential(USER_ID_CREDENTIAL)),
        }
    }
}

/// Project API key from the API key header
///
/// Only presence is checked here; the key is resolved against the caller
/// inside the unit of work that uses it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyHeader(pub String);

impl std::fmt::Debug for ApiKeyHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeyHeader(..)")
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ApiKeyHeader {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let context = match app_context(request) {
            Ok(context) => context,
            Err(e) => return reject(request, e),
        };

        match header(request, &context.config.auth.api_key.header) {
            Some(key) => Outcome::Success(ApiKeyHeader(key)),
            None => reject(request, Error::missing_credential(API_KEY_CREDENTIAL)),
        }
    }
}

/// A verified session
///
/// The token is taken from the session cookie, or from the header of the
/// same name when no cookie is sent. It must be the caller's current token
/// and unexpired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let context = match app_context(request) {
            Ok(context) => context,
            Err(e) => return reject(request, e),
        };
        let auth = &context.config.auth;

        let Some(user_id) = header(request, &auth.user_id_header) else {
            return reject(request, Error::missing_credential(USER_ID_CREDENTIAL));
        };

        let cookie = request
            .cookies()
            .get(&auth.session_cookie.name)
            .map(|c| c.value().to_string());
        let from_header = header(request, &auth.session_cookie.name);
        let Some(token) =
            select_presented_token(cookie.as_deref(), from_header.as_deref()).map(str::to_string)
        else {
            return reject(request, Error::missing_credential(TOKEN_CREDENTIAL));
        };

        let verified = run_blocking(context, move |ctx| {
            ctx.sessions().authorize(&user_id, &token)
        })
        .await;

        match verified {
            Ok(grant) => Outcome::Success(Session {
                user_id: grant.user_id,
                expires_at: grant.expires_at,
            }),
            Err(e) => reject(request, e),
        }
    }
}
