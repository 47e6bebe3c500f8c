//! Repository trait.

use async_trait::async_trait;
use idm_model::{Account, Group};

use crate::error::StorageResult;

/// Persists and materializes accounts and groups.
///
/// Identifiers are canonical `opaque@issuer` strings as produced by the
/// indexes. Implementations must be thread-safe and support concurrent
/// access.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Stores an account, filling in generated fields.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Unsupported` on read-only backends.
    async fn write_account(&self, account: &mut Account) -> StorageResult<()>;

    /// Loads one account.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the account doesn't exist.
    async fn load_account(&self, id: &str) -> StorageResult<Account>;

    /// Loads every account the backend can normalize.
    async fn load_accounts(&self) -> StorageResult<Vec<Account>>;

    /// Deletes an account.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Unsupported` on read-only backends.
    async fn delete_account(&self, id: &str) -> StorageResult<()>;

    /// Stores a group.
    async fn write_group(&self, group: &mut Group) -> StorageResult<()>;

    /// Loads one group.
    async fn load_group(&self, id: &str) -> StorageResult<Group>;

    /// Loads every group.
    async fn load_groups(&self) -> StorageResult<Vec<Group>>;

    /// Deletes a group.
    async fn delete_group(&self, id: &str) -> StorageResult<()>;
}
