//! The index contract.

use std::fmt;

use async_trait::async_trait;

use crate::error::{IndexError, IndexResult};
use crate::field::FieldDescriptor;

/// Index variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// At most one record per value.
    Unique,
    /// Any number of records per value.
    NonUnique,
    /// Sequential integer allocator.
    Autoincrement,
}

impl IndexKind {
    /// Returns the registry name of this variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::NonUnique => "non_unique",
            Self::Autoincrement => "autoincrement",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves field values to record identifiers.
///
/// Identifiers are returned in canonical `opaque@issuer` form. Indexes are
/// built uninitialized by the registry; `init` must complete before any
/// query and may be called again without effect.
///
/// The mutating operations default to `Unsupported`, which is the answer
/// of every read-only backend.
#[async_trait]
pub trait Index: Send + Sync + fmt::Debug {
    /// Prepares the index for queries.
    async fn init(&mut self) -> IndexResult<()>;

    /// Returns the identifiers whose field equals `value`.
    async fn lookup(&self, value: &str) -> IndexResult<Vec<String>>;

    /// Returns the identifiers whose field contains `pattern`.
    ///
    /// Results may include records a `lookup` would not return, but never
    /// omit one it would.
    async fn search(&self, pattern: &str) -> IndexResult<Vec<String>>;

    /// Associates `value` with record `id`.
    async fn add(&self, id: &str, value: &str) -> IndexResult<String> {
        let _ = (id, value);
        Err(self.unsupported("add"))
    }

    /// Removes the association of `value` with record `id`.
    async fn remove(&self, id: &str, value: &str) -> IndexResult<()> {
        let _ = (id, value);
        Err(self.unsupported("remove"))
    }

    /// Moves record `id` from `old_value` to `new_value`.
    async fn update(&self, id: &str, old_value: &str, new_value: &str) -> IndexResult<()> {
        let _ = (id, old_value, new_value);
        Err(self.unsupported("update"))
    }

    /// Drops the index.
    async fn delete(&self) -> IndexResult<()> {
        Err(self.unsupported("delete"))
    }

    /// Returns true if values compare case-insensitively.
    fn case_insensitive(&self) -> bool;

    /// Returns the indexed field.
    fn index_by(&self) -> &FieldDescriptor;

    /// Returns the configured type name.
    fn type_name(&self) -> &str;

    /// Returns the variant.
    fn kind(&self) -> IndexKind;

    /// Returns the backend name.
    fn backend(&self) -> &str;

    /// Builds the error returned by unsupported operations.
    fn unsupported(&self, operation: &str) -> IndexError {
        IndexError::unsupported(format!(
            "{operation} on {} {} index for {}",
            self.backend(),
            self.kind(),
            self.index_by()
        ))
    }
}
