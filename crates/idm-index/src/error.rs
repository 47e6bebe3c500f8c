//! Index error types.

use idm_core::ErrorKind;
use idm_directory::{DirectoryError, TokenError};
use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A unique index has no entry for the value.
    #[error("{type_name} with {field} '{value}' not found")]
    NotFound {
        /// Record type name.
        type_name: String,
        /// Indexed field.
        field: String,
        /// Looked up value.
        value: String,
    },

    /// A unique index resolved the value to more than one record.
    #[error("{type_name} {field} '{value}' is ambiguous: {count} records match")]
    Ambiguous {
        /// Record type name.
        type_name: String,
        /// Indexed field.
        field: String,
        /// Looked up value.
        value: String,
        /// Number of distinct records matched.
        count: usize,
    },

    /// Operation not supported by this index on this backend.
    #[error("operation not supported: {0}")]
    Unsupported(String),

    /// Invalid index configuration.
    #[error("index configuration error: {0}")]
    Configuration(String),

    /// The session token could not be obtained or was rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The index was used before `init`.
    #[error("index not initialized: {0}")]
    NotInitialized(String),

    /// Registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Opaque backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl IndexError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
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

    /// Checks if this is an authentication error.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

impl From<DirectoryError> for IndexError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Unauthenticated(msg) => Self::Authentication(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}

impl From<TokenError> for IndexError {
    fn from(err: TokenError) -> Self {
        Self::Authentication(err.to_string())
    }
}

impl From<IndexError> for idm_core::Error {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::NotFound {
                type_name, value, ..
            } => Self::NotFound {
                entity: type_name,
                id: value,
            },
            IndexError::Unsupported(op) => Self::Unsupported(op),
            IndexError::Authentication(msg) => Self::Authentication(msg),
            IndexError::Configuration(msg) => Self::Configuration(msg),
            IndexError::Registry(e) => Self::Configuration(e.to_string()),
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors raised by the index registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A constructor is already registered under this key.
    #[error("index constructor already registered: {backend}/{kind}")]
    Duplicate {
        /// Backend name.
        backend: String,
        /// Variant name.
        kind: String,
    },

    /// No constructor is registered under this key.
    #[error("unknown index: {backend}/{kind}")]
    UnknownIndex {
        /// Backend name.
        backend: String,
        /// Variant name.
        kind: String,
    },
}
