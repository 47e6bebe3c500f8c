//! # idm-directory
//!
//! The remote directory service as seen by indexes and repositories.
//!
//! The directory is authoritative and read-only: the core only issues
//! "find by claim", "find by filter" and "get by id" queries, each carrying
//! a freshly minted session token in its [`CallContext`].
//!
//! - [`DirectoryClient`] - query interface of the user provider
//! - [`DirectoryConnector`] - resolves a provider address to a client
//! - [`TokenProvider`] - mints session tokens for the service user
//! - [`InMemoryDirectory`] - in-process directory for tests and demos

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod client;
pub mod error;
pub mod memory;
pub mod token;
pub mod types;

pub use auth::authenticated_context;
pub use client::{CallContext, DirectoryClient, DirectoryConnector, StaticConnector, TOKEN_HEADER};
pub use error::{DirectoryError, DirectoryResult, StatusCode, TokenError};
pub use memory::InMemoryDirectory;
pub use token::{JwtTokenProvider, SessionClaims, TokenProvider};
pub use types::{OpaqueEntry, OpaqueError, UserId, UserRecord};
