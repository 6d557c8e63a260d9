//! Registration and session endpoints

use everylog_application::{NewUser, select_presented_token};
use everylog_domain::error::Error;
use everylog_infrastructure::AppContext;
use rocket::http::{Cookie, CookieJar};
use rocket::serde::json::Json;
use rocket::{State, post};

use super::run_blocking;
use crate::constants::{AUTHORIZED_MESSAGE, TOKEN_CREDENTIAL};
use crate::error::ApiError;
use crate::guards::CallerId;
use crate::models::{
    AuthenticateRequest, AuthorizeRequest, CreateUserRequest, IdResponse, MessageResponse,
    TokenResponse, validated,
};

/// `POST /user` - register a user, returns its id
#[post("/user", format = "json", data = "<request>")]
pub async fn create_user(
    request: Json<CreateUserRequest>,
    context: &State<AppContext>,
) -> Result<Json<IdResponse>, ApiError> {
    let input: NewUser = validated(request.into_inner())?.into();
    let id = run_blocking(context, move |ctx| ctx.users().create_user(&input)).await?;
    Ok(Json(IdResponse { id }))
}

/// `POST /authenticate` - exchange a password for a session token
///
/// The token is returned in the body and set as the session cookie.
#[post("/authenticate", format = "json", data = "<request>")]
pub async fn authenticate(
    caller: CallerId,
    request: Json<AuthenticateRequest>,
    cookies: &CookieJar<'_>,
    context: &State<AppContext>,
) -> Result<Json<TokenResponse>, ApiError> {
    let CallerId(user_id) = caller;
    let password = request.into_inner().password;
    let session = run_blocking(context, move |ctx| {
        ctx.sessions().authenticate(&user_id, &password)
    })
    .await?;

    let cookie = &context.config.auth.session_cookie;
    cookies.add(
        Cookie::build((cookie.name.clone(), session.token.clone()))
            .path("/")
            .http_only(cookie.http_only)
            .secure(cookie.secure),
    );

    Ok(Json(TokenResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// `POST /authorize` - check a session token
///
/// The session cookie wins over a `token` field in the body.
#[post("/authorize", data = "<request>")]
pub async fn authorize(
    caller: CallerId,
    request: Option<Json<AuthorizeRequest>>,
    cookies: &CookieJar<'_>,
    context: &State<AppContext>,
) -> Result<Json<MessageResponse>, ApiError> {
    let CallerId(user_id) = caller;
    let cookie = cookies
        .get(&context.config.auth.session_cookie.name)
        .map(|c| c.value().to_string());
    let body = request.and_then(|r| r.into_inner().token);
    let token = select_presented_token(cookie.as_deref(), body.as_deref())
        .map(str::to_string)
        .ok_or_else(|| Error::missing_credential(TOKEN_CREDENTIAL))?;

    run_blocking(context, move |ctx| ctx.sessions().authorize(&user_id, &token)).await?;

    Ok(Json(MessageResponse {
        message: AUTHORIZED_MESSAGE.to_string(),
    }))
}
