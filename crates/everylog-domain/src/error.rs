//! Error handling types
//!
//! One taxonomy for every failure a caller can observe. Raw store failures
//! are a separate type ([`crate::ports::StoreError`]) that never leaves the
//! application layer; they are classified into [`Error::Storage`] or
//! [`Error::AlreadyExists`] first.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the wrapping variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for everylog
#[derive(Error, Debug)]
pub enum Error {
    /// Caller identity does not match the credential, or the password or
    /// stored session token does not match
    #[error("Unauthorized")]
    Unauthorized,

    /// Session token signature is valid but its expiry has passed
    #[error("Expired token")]
    ExpiredToken,

    /// Session token could not be verified
    #[error("Invalid token")]
    InvalidToken,

    /// A uniqueness rule rejected the write
    #[error("{resource} already exists")]
    AlreadyExists {
        /// What already exists (e.g. "project", "email")
        resource: String,
    },

    /// A required input field was absent or empty
    #[error("{field} is required")]
    MissingRequiredField {
        /// Name of the missing field
        field: String,
    },

    /// A credential the boundary must supply was absent (user id header,
    /// API key, session token)
    #[error("{name} required")]
    MissingCredential {
        /// Human readable credential name
        name: String,
    },

    /// The store failed, or a row the operation depends on was absent
    #[error("Database error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Encoding or decoding of a payload failed
    #[error("Encoding error: {message}")]
    Encoding {
        /// Description of the encoding failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create an already-exists error
    pub fn already_exists<S: Into<String>>(resource: S) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create a missing required field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create a missing credential error
    pub fn missing_credential<S: Into<String>>(name: S) -> Self {
        Self::MissingCredential { name: name.into() }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with source
    pub fn storage_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an encoding error
    pub fn encoding<S: Into<String>>(message: S) -> Self {
        Self::Encoding {
            message: message.into(),
            source: None,
        }
    }

    /// Create an encoding error with source
    pub fn encoding_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Encoding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error means the caller failed an identity or token check
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::ExpiredToken
                | Self::InvalidToken
                | Self::MissingCredential { .. }
        )
    }

    /// Message safe to show to a remote caller
    ///
    /// Storage, encoding, configuration and internal failures collapse to a
    /// fixed string so driver text never crosses the boundary.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage { .. } => "Database error".to_string(),
            Self::Encoding { .. } => "Json parsing error".to_string(),
            Self::Configuration { .. } | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
