//! HTTP error mapping
//!
//! Every failure leaves the server as `{"error": "<message>"}`.
//!
//! | Error | Status |
//! |-------|--------|
//! | `Unauthorized`, `ExpiredToken`, `InvalidToken`, `MissingCredential` | 401 |
//! | `AlreadyExists` | 409 |
//! | `MissingRequiredField` | 422 |
//! | everything else | 500 |
//!
//! Handlers return [`ApiError`]. Request guards cannot choose the response
//! body, so they leave their message in the request-local cache through
//! [`reject`] and the catchers pick it up.

use everylog_domain::error::Error;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, Request};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{Catcher, catch, catchers};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::constants::{INTERNAL_ERROR_MESSAGE, JSON_PARSING_ERROR, NOT_FOUND_MESSAGE};

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &Error) -> Status {
    match error {
        Error::Unauthorized
        | Error::ExpiredToken
        | Error::InvalidToken
        | Error::MissingCredential { .. } => Status::Unauthorized,
        Error::AlreadyExists { .. } => Status::Conflict,
        Error::MissingRequiredField { .. } => Status::UnprocessableEntity,
        Error::Storage { .. }
        | Error::Encoding { .. }
        | Error::Configuration { .. }
        | Error::Internal { .. } => Status::InternalServerError,
    }
}

/// Domain error returned from a handler
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = status_for(&self.0);
        log_failure(request, status, &self.0);
        (status, Json(ErrorBody::new(self.0.public_message()))).respond_to(request)
    }
}

/// Public message left behind by a failed request guard
#[derive(Debug, Default)]
struct GuardFailure(Option<String>);

/// Fail a request guard with `error`
pub(crate) fn reject<T>(request: &Request<'_>, error: Error) -> request::Outcome<T, Error> {
    let status = status_for(&error);
    log_failure(request, status, &error);
    request.local_cache(|| GuardFailure(Some(error.public_message())));
    Outcome::Error((status, error))
}

fn guard_message(request: &Request<'_>) -> Option<String> {
    request.local_cache(GuardFailure::default).0.clone()
}

fn log_failure(request: &Request<'_>, status: Status, error: &Error) {
    if status == Status::InternalServerError {
        error!(method = %request.method(), uri = %request.uri(), error = %error, "Request failed");
    } else if error.is_auth_failure() {
        warn!(method = %request.method(), uri = %request.uri(), error = %error, "Request rejected");
    } else {
        debug!(method = %request.method(), uri = %request.uri(), error = %error, "Request rejected");
    }
}

/// Body or query string that did not decode
fn undecodable(status: Status, request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    if let Some(message) = guard_message(request) {
        return (status, Json(ErrorBody::new(message)));
    }
    warn!(uri = %request.uri(), %status, "Request payload could not be decoded");
    (
        Status::InternalServerError,
        Json(ErrorBody::new(JSON_PARSING_ERROR)),
    )
}

#[catch(400)]
fn bad_request(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    undecodable(Status::BadRequest, request)
}

#[catch(422)]
fn unprocessable(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    undecodable(Status::UnprocessableEntity, request)
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let message = guard_message(request).unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string());
    (Status::NotFound, Json(ErrorBody::new(message)))
}

#[catch(default)]
fn fallback(status: Status, request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let message = guard_message(request).unwrap_or_else(|| {
        status
            .reason()
            .unwrap_or(INTERNAL_ERROR_MESSAGE)
            .to_string()
    });
    (status, Json(ErrorBody::new(message)))
}

/// Catchers rendering every error status as an [`ErrorBody`]
pub fn error_catchers() -> Vec<Catcher> {
    catchers![bad_request, unprocessable, not_found, fallback]
}
