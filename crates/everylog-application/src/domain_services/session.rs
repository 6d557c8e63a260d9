//! Session Token Authority
//!
//! Per user: `NoSession -> SessionIssued -> SessionIssued(newer)`. Only the
//! most recently issued token is accepted, because issuing overwrites the
//! stored value in the same unit of work that verified the password.
//!
//! Passwords are compared as plaintext bytes.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use everylog_domain::constants::{BEARER_PREFIX, SESSION_TOKEN_PREFIX};
use everylog_domain::error::{Error, Result};
use everylog_domain::ports::{Clock, SessionTokenCodec};
use everylog_domain::value_objects::{SessionClaims, SessionGrant, SessionToken};
use tracing::{info, warn};
use uuid::Uuid;

use super::orchestrator::MutationOrchestrator;

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionTokenAuthority {
    orchestrator: MutationOrchestrator,
    codec: Arc<dyn SessionTokenCodec>,
    clock: Arc<dyn Clock>,
    lifetime: Duration,
}

impl SessionTokenAuthority {
    pub fn new(
        orchestrator: MutationOrchestrator,
        codec: Arc<dyn SessionTokenCodec>,
        clock: Arc<dyn Clock>,
        lifetime: Duration,
    ) -> Self {
        Self {
            orchestrator,
            codec,
            clock,
            lifetime,
        }
    }

    /// Verify `password` and issue a new token, replacing any previous one
    ///
    /// Nothing is returned unless the new token was stored and committed.
    pub fn authenticate(&self, user_id: &str, password: &str) -> Result<SessionToken> {
        if user_id.is_empty() {
            return Err(Error::missing_credential("User id"));
        }

        self.orchestrator.run_atomic("session token", |uow| {
            let secret = uow.find_user_secret(user_id)?;
            if secret.password != password {
                warn!(user_id, "Password mismatch");
                return Err(Error::Unauthorized.into());
            }

            let issued_at = self.clock.now();
            let expires_at = issued_at + self.lifetime;
            let claims = SessionClaims {
                user_id: secret.user_id,
                email: secret.email,
                password: secret.password,
                iat: issued_at.timestamp(),
                exp: expires_at.timestamp(),
                jti: Uuid::new_v4().to_string(),
            };
            let token = self.codec.encode(&claims)?;
            uow.store_session_token(user_id, &token)?;

            info!(user_id, %expires_at, "Issued session token");
            Ok(SessionToken { token, expires_at })
        })
    }

    /// Check a presented token
    ///
    /// 1. It must equal the stored token (`Unauthorized`).
    /// 2. Its signature must verify (`InvalidToken`) and its subject must be
    ///    `user_id` (`Unauthorized`).
    /// 3. Its expiry must be strictly after now (`ExpiredToken`).
    pub fn authorize(&self, user_id: &str, presented: &str) -> Result<SessionGrant> {
        if user_id.is_empty() {
            return Err(Error::missing_credential("User id"));
        }
        let token = strip_token_prefix(presented);
        if token.is_empty() {
            return Err(Error::missing_credential("Authorization token"));
        }

        let stored = self
            .orchestrator
            .read(|uow| Ok(uow.find_session_token(user_id)?))?;
        if stored.as_deref() != Some(token) {
            warn!(user_id, "Presented token is not the current session token");
            return Err(Error::Unauthorized);
        }

        let claims = self.codec.decode(token)?;
        if claims.user_id != user_id {
            warn!(user_id, "Session token subject mismatch");
            return Err(Error::Unauthorized);
        }

        let now = self.clock.now();
        if claims.exp <= now.timestamp() {
            info!(user_id, "Session token expired");
            return Err(Error::ExpiredToken);
        }

        Ok(SessionGrant {
            user_id: claims.user_id,
            expires_at: DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or(now),
        })
    }
}

/// Remove a leading `Bearer: ` (or `Bearer `) and surrounding whitespace
pub fn strip_token_prefix(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix(SESSION_TOKEN_PREFIX)
        .or_else(|| raw.strip_prefix(BEARER_PREFIX))
        .unwrap_or(raw)
        .trim()
}

/// Pick the token to verify: the cookie wins when present and non-empty
pub fn select_presented_token<'a>(
    cookie: Option<&'a str>,
    body: Option<&'a str>,
) -> Option<&'a str> {
    cookie
        .filter(|c| !c.trim().is_empty())
        .or(body.filter(|b| !b.trim().is_empty()))
}
