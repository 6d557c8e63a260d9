//! HS256 session token codec
//!
//! Expiry is not validated here; the session authority compares `exp`
//! against its injected clock.

use std::collections::HashSet;

use everylog_domain::error::{Error, Result};
use everylog_domain::ports::SessionTokenCodec;
use everylog_domain::value_objects::SessionClaims;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use crate::error_ext::ErrorContext;

/// Signs and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct JwtSessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtSessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl SessionTokenCodec for JwtSessionCodec {
    fn encode(&self, claims: &SessionClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .encoding_context("Failed to sign session token")
    }

    fn decode(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Session token rejected");
                Error::InvalidToken
            })
    }
}
