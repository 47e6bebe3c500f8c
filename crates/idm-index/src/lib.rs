//! # idm-index
//!
//! Attribute indexes for the identity directory.
//!
//! An index answers "which records have this field value" with canonical
//! `opaque@issuer` identifiers. This crate provides:
//!
//! - [`Index`] - the index contract
//! - [`field`] - the static table of indexable fields
//! - [`directory`] - unique, non-unique and autoincrement indexes backed by
//!   the remote directory service
//! - [`IndexRegistry`] - constructors keyed by (backend, kind)
//! - [`IndexSet`] - the configured indexes, initialized and routable
//!
//! ## Example
//!
//! ```ignore
//! let mut builder = IndexRegistryBuilder::new();
//! register_directory_indexes(&mut builder)?;
//! let registry = builder.build();
//!
//! let indexes = IndexSet::from_config(&registry, &config, connector).await?;
//! let ids = indexes.lookup("account", "Mail", "alice@example.org").await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod compose;
pub mod directory;
pub mod error;
pub mod field;
pub mod index;
pub mod options;
pub mod registry;

pub use compose::IndexSet;
pub use directory::{register_directory_indexes, AutoincrementIndex, NonUniqueIndex, UniqueIndex};
pub use error::{IndexError, IndexResult, RegistryError};
pub use field::{FieldDescriptor, RecordKind, ValueKind};
pub use index::{Index, IndexKind};
pub use options::IndexOptions;
pub use registry::{IndexConstructor, IndexRegistry, IndexRegistryBuilder};
