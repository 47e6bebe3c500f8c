//! Error taxonomy shared by indexes and repositories.
//!
//! Two sentinel kinds cross every component: [`ErrorKind::NotFound`] and
//! [`ErrorKind::Unsupported`]. Callers branch on the kind, never on message
//! text. Everything else is opaque and carries the backend's message.

use thiserror::Error;

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failure, independent of the component that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A specific identifier or value does not exist in the backend.
    NotFound,

    /// The operation is structurally impossible against the backend.
    Unsupported,

    /// Any other failure (authentication, transport, malformed data, ...).
    Other,
}

/// Component-agnostic error.
///
/// Crate-specific errors convert into this type so composition code can
/// handle index and repository failures uniformly.
#[derive(Debug, Error)]
pub enum Error {
    /// A lookup or load addressed something the backend does not have.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity ("account", "group", or an index type name).
        entity: String,
        /// Identifier or value that was looked up.
        id: String,
    },

    /// Operation not supported by the backend.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A session could not be established.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Opaque backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
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
        matches!(self.kind(), ErrorKind::NotFound)
    }

    /// Checks if this is an unsupported-operation error.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.kind(), ErrorKind::Unsupported)
    }
}
