use async_trait::async_trait;
use idm_core::config::{Bound, DIRECTORY_BACKEND};

use crate::error::{IndexError, IndexResult};
use crate::field::{FieldDescriptor, ValueKind};
use crate::index::{Index, IndexKind};
use crate::options::IndexOptions;

/// Sequential integer allocator.
///
/// The directory assigns numeric ids itself, so this index only checks
/// that it was configured on an integer field with a sane bound. Every
/// query and mutation reports `Unsupported`.
#[derive(Debug)]
pub struct AutoincrementIndex {
    type_name: String,
    field: FieldDescriptor,
    case_insensitive: bool,
    bound: Option<Bound>,
}

impl AutoincrementIndex {
    /// Creates the index.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error for an unknown record type or field,
    /// a text field, or a bound with `lower > upper`.
    pub fn new(opts: IndexOptions) -> IndexResult<Self> {
        if opts.type_name.is_empty() {
            return Err(IndexError::config("autoincrement index requires a record type"));
        }
        let field = FieldDescriptor::for_type(&opts.type_name, &opts.index_by)?;
        if field.value_kind() != ValueKind::Integer {
            return Err(IndexError::config(format!(
                "autoincrement index requires a numeric field, {field} is text"
            )));
        }
        if let Some(bound) = opts.bound.filter(|b| !b.is_valid()) {
            return Err(IndexError::config(format!(
                "invalid bound for {field}: lower {} exceeds upper {}",
                bound.lower, bound.upper
            )));
        }

        Ok(Self {
            type_name: opts.type_name,
            field,
            case_insensitive: opts.case_insensitive,
            bound: opts.bound,
        })
    }

    /// Returns the configured allocation range.
    #[must_use]
    pub const fn bound(&self) -> Option<Bound> {
        self.bound
    }
}

#[async_trait]
impl Index for AutoincrementIndex {
    async fn init(&mut self) -> IndexResult<()> {
        tracing::debug!(field = %self.field, bound = ?self.bound, "Initialized autoincrement index");
        Ok(())
    }

    async fn lookup(&self, _value: &str) -> IndexResult<Vec<String>> {
        Err(self.unsupported("lookup"))
    }

    async fn search(&self, _pattern: &str) -> IndexResult<Vec<String>> {
        Err(self.unsupported("search"))
    }

    fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn index_by(&self) -> &FieldDescriptor {
        &self.field
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn kind(&self) -> IndexKind {
        IndexKind::Autoincrement
    }

    fn backend(&self) -> &str {
        DIRECTORY_BACKEND
    }
}
