//! End-to-end scenarios.
//!
//! These tests wire indexes and the repository to an in-memory directory
//! that verifies every session token.

mod common;
mod index_resolution;
mod registry;
mod repository_flow;
