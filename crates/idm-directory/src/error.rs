//! Directory and token errors.
//!
//! Error messages carry the backend's message verbatim and never the
//! signing secret.

use thiserror::Error;

/// Non-OK status codes reported by the directory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// The request was malformed.
    InvalidArgument,
    /// The caller may not perform the request.
    PermissionDenied,
    /// The service does not implement the request.
    Unimplemented,
    /// The service is temporarily unavailable.
    Unavailable,
    /// Internal failure of the service.
    Internal,
}

/// Errors returned by directory calls.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The session token was missing or rejected.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The service answered with a non-OK status.
    #[error("{code:?}: {message}")]
    Status {
        /// Status code.
        code: StatusCode,
        /// Message reported by the service.
        message: String,
    },

    /// The provider address could not be resolved or connected.
    #[error("connection error: {0}")]
    Connection(String),

    /// The call failed in transit.
    #[error("transport error: {0}")]
    Transport(String),
}

impl DirectoryError {
    /// Creates a status error.
    #[must_use]
    pub fn status(code: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Checks if the session was rejected.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

/// Result type for directory calls.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors raised while minting or validating session tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Invalid token configuration.
    #[error("token configuration error: {0}")]
    Configuration(String),

    /// Signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Validation failed.
    #[error("token validation failed: {0}")]
    Validation(String),
}
