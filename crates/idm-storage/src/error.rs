//! Storage error types.

use idm_core::ErrorKind;
use idm_directory::{DirectoryError, TokenError};
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Record not found.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind ("account" or "group").
        kind: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// Operation not supported by the repository.
    #[error("operation not supported: {0}")]
    Unsupported(String),

    /// The session token could not be obtained or was rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A backend record could not be normalized.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Opaque backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates an unsupported-operation error.
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    /// Returns the sentinel kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            _ => ErrorKind::Other,
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is an unsupported-operation error.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl From<DirectoryError> for StorageError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Unauthenticated(msg) => Self::Authentication(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}

impl From<TokenError> for StorageError {
    fn from(err: TokenError) -> Self {
        Self::Authentication(err.to_string())
    }
}

impl From<StorageError> for idm_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { kind, id } => Self::not_found(kind, id),
            StorageError::Unsupported(op) => Self::Unsupported(op),
            StorageError::Authentication(msg) => Self::Authentication(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Result type for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;
