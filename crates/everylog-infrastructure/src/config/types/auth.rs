//! Authentication configuration types

use crate::constants::{
    API_KEY_HEADER, JWT_DEFAULT_EXPIRATION_SECS, SESSION_COOKIE_NAME, USER_ID_HEADER,
};
use everylog_domain::constants::API_KEY_LENGTH;
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HS256 signing secret
    ///
    /// **REQUIRED**. Configure via `EVERYLOG__AUTH__JWT__SECRET`,
    /// `JWT_SIGNING_KEY`, or `auth.jwt.secret` in the config file.
    /// Must be at least 32 characters.
    pub secret: String,

    /// Session token lifetime in seconds
    pub expiration_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            // Empty by default; validation in loader.rs rejects it
            secret: String::new(),
            expiration_secs: JWT_DEFAULT_EXPIRATION_SECS,
        }
    }
}

/// API key configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyConfig {
    /// Header carrying the key
    pub header: String,

    /// Length of generated keys in hex characters
    pub length: usize,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            header: API_KEY_HEADER.to_string(),
            length: API_KEY_LENGTH,
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionCookieConfig {
    /// Cookie name, also accepted as a request header
    pub name: String,

    /// Mark the cookie `HttpOnly`
    pub http_only: bool,

    /// Mark the cookie `Secure`
    pub secure: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            http_only: true,
            secure: true,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session token signing
    pub jwt: JwtConfig,

    /// API key transport and generation
    pub api_key: ApiKeyConfig,

    /// Header carrying the caller's user id
    pub user_id_header: String,

    /// Session cookie
    pub session_cookie: SessionCookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            api_key: ApiKeyConfig::default(),
            user_id_header: USER_ID_HEADER.to_string(),
            session_cookie: SessionCookieConfig::default(),
        }
    }
}
