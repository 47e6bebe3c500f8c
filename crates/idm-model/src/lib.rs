//! # idm-model
//!
//! Canonical account and group records.
//!
//! Records are denormalized projections of backend-native user and group
//! objects. They are built fresh for every load and never cached.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod account;
pub mod group;

pub use account::Account;
pub use group::Group;
