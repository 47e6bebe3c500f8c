//! # idm-core
//!
//! Foundational types shared by every idm crate: the error taxonomy that
//! index and repository callers branch on, the canonical record identifier,
//! configuration and logging bootstrap.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod id;
pub mod logging;

pub use config::{Config, ServiceUser};
pub use error::{Error, ErrorKind, Result};
pub use id::RecordId;
