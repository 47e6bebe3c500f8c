//! Indexes answered by the remote directory service.
//!
//! The directory is read-only: [`UniqueIndex`] and [`NonUniqueIndex`]
//! translate lookups into claim and filter queries, and
//! [`AutoincrementIndex`] only validates its configuration. All mutations
//! report `Unsupported`.

mod autoincrement;
mod non_unique;
mod session;
mod unique;

pub use autoincrement::AutoincrementIndex;
pub use non_unique::NonUniqueIndex;
pub use unique::UniqueIndex;

use idm_core::config::DIRECTORY_BACKEND;
use idm_core::RecordId;

use crate::error::{IndexResult, RegistryError};
use crate::field::FieldDescriptor;
use crate::index::{Index, IndexKind};
use crate::options::IndexOptions;
use crate::registry::IndexRegistryBuilder;

/// Registers the directory variants under backend `"directory"`.
///
/// ## Errors
///
/// Returns [`RegistryError::Duplicate`] if any of the keys is taken.
pub fn register_directory_indexes(builder: &mut IndexRegistryBuilder) -> Result<(), RegistryError> {
    builder.register(DIRECTORY_BACKEND, IndexKind::Unique.as_str(), new_unique)?;
    builder.register(DIRECTORY_BACKEND, IndexKind::NonUnique.as_str(), new_non_unique)?;
    builder.register(
        DIRECTORY_BACKEND,
        IndexKind::Autoincrement.as_str(),
        new_autoincrement,
    )?;
    Ok(())
}

fn new_unique(opts: IndexOptions) -> IndexResult<Box<dyn Index>> {
    Ok(Box::new(UniqueIndex::new(opts)?))
}

fn new_non_unique(opts: IndexOptions) -> IndexResult<Box<dyn Index>> {
    Ok(Box::new(NonUniqueIndex::new(opts)?))
}

fn new_autoincrement(opts: IndexOptions) -> IndexResult<Box<dyn Index>> {
    Ok(Box::new(AutoincrementIndex::new(opts)?))
}

/// Filter text sent to the directory for `value` on `field`.
///
/// Fields the free-text filter does not cover fetch every record and are
/// matched locally. Identifiers are queried by their opaque part.
fn backend_filter(field: &FieldDescriptor, value: &str) -> String {
    if !field.is_searchable() {
        String::new()
    } else if field.is_identifier() {
        RecordId::parse(value).opaque_id
    } else {
        value.to_string()
    }
}

fn values_equal(a: &str, b: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

fn contains(haystack: &str, needle: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}

fn push_unique(ids: &mut Vec<String>, id: String) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
