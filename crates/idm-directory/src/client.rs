//! Directory client contract.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DirectoryResult;
use crate::types::{UserId, UserRecord};

/// Metadata key the session token travels under.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Outgoing call metadata.
///
/// Built per call; never shared between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    metadata: HashMap<String, String>,
}

impl CallContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a session token.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_metadata(TOKEN_HEADER, token)
    }

    /// Appends a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the session token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.get(TOKEN_HEADER)
    }

    /// Returns a metadata entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Query interface of the directory's user provider.
///
/// Implementations must be thread-safe; every call is independent.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Finds users whose `claim` equals `value`.
    ///
    /// Claims understood by the provider: `userid`, `mail`, `username`,
    /// `uid`, `gid`. A well-behaved provider returns exactly one record.
    ///
    /// ## Errors
    ///
    /// Returns `DirectoryError::NotFound` when nothing matches.
    async fn get_user_by_claim(
        &self,
        ctx: &CallContext,
        claim: &str,
        value: &str,
    ) -> DirectoryResult<Vec<UserRecord>>;

    /// Finds users matching a free-text filter.
    ///
    /// The filter is matched against the provider's searchable fields. An
    /// empty filter returns every user.
    async fn find_users(&self, ctx: &CallContext, filter: &str) -> DirectoryResult<Vec<UserRecord>>;

    /// Gets a user by id.
    ///
    /// ## Errors
    ///
    /// Returns `DirectoryError::NotFound` if the user does not exist.
    async fn get_user(&self, ctx: &CallContext, id: &UserId) -> DirectoryResult<UserRecord>;
}

/// Resolves a provider address to a client.
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
    /// Connects to the user provider at `addr`.
    async fn connect(&self, addr: &str) -> DirectoryResult<Arc<dyn DirectoryClient>>;
}

/// Connector that hands out one preconfigured client for any address.
#[derive(Clone)]
pub struct StaticConnector {
    client: Arc<dyn DirectoryClient>,
}

impl StaticConnector {
    /// Creates a connector for the given client.
    #[must_use]
    pub fn new(client: Arc<dyn DirectoryClient>) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for StaticConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticConnector").finish_non_exhaustive()
    }
}

#[async_trait]
impl DirectoryConnector for StaticConnector {
    async fn connect(&self, addr: &str) -> DirectoryResult<Arc<dyn DirectoryClient>> {
        tracing::debug!(addr = %addr, "Using static directory client");
        Ok(Arc::clone(&self.client))
    }
}
