//! # idm-storage
//!
//! Materializes accounts and groups for identifiers produced by the
//! indexes.
//!
//! - [`Repository`] - the repository contract
//! - [`DirectoryRepository`] - read-only repository over the directory
//!   service
//! - [`mapper`] - normalization of directory records

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod directory;
pub mod error;
pub mod mapper;
pub mod repository;

pub use directory::DirectoryRepository;
pub use error::{StorageError, StorageResult};
pub use mapper::map_to_account;
pub use repository::Repository;
