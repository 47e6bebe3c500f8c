//! Repository backed by the directory service.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use idm_core::{Config, RecordId, ServiceUser};
use idm_directory::{
    authenticated_context, CallContext, DirectoryClient, DirectoryConnector, JwtTokenProvider,
    TokenProvider, UserId,
};
use idm_model::{Account, Group};

use crate::error::{StorageError, StorageResult};
use crate::mapper::map_to_account;
use crate::repository::Repository;

/// Read-only account repository answered by the directory.
///
/// Every call resolves the client through the connector and mints a fresh
/// session token. Groups and all writes are unsupported.
pub struct DirectoryRepository {
    provider_addr: String,
    service_user: ServiceUser,
    connector: Arc<dyn DirectoryConnector>,
    tokens: Arc<dyn TokenProvider>,
}

impl DirectoryRepository {
    /// Creates a repository from the shared configuration.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Authentication` if no token provider can be
    /// built from the configured secret.
    pub fn new(config: &Config, connector: Arc<dyn DirectoryConnector>) -> StorageResult<Self> {
        let tokens = JwtTokenProvider::new(&config.token_manager.jwt_secret)?;
        Ok(Self {
            provider_addr: config.directory.provider_addr.clone(),
            service_user: config.service_user.clone(),
            connector,
            tokens: Arc::new(tokens),
        })
    }

    /// Replaces the token provider.
    #[must_use]
    pub fn with_token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    async fn session(&self) -> StorageResult<(Arc<dyn DirectoryClient>, CallContext)> {
        let ctx = authenticated_context(self.tokens.as_ref(), &self.service_user).await?;
        let client = self.connector.connect(&self.provider_addr).await?;
        Ok((client, ctx))
    }
}

impl fmt::Debug for DirectoryRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryRepository")
            .field("provider_addr", &self.provider_addr)
            .field("service_user", &self.service_user.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Repository for DirectoryRepository {
    async fn write_account(&self, _account: &mut Account) -> StorageResult<()> {
        Err(StorageError::unsupported("write_account on directory repository"))
    }

    async fn load_account(&self, id: &str) -> StorageResult<Account> {
        let (client, ctx) = self.session().await?;
        let user_id = UserId::from(&RecordId::parse(id));

        let user = client.get_user(&ctx, &user_id).await.map_err(|e| {
            if e.is_not_found() {
                StorageError::not_found("account", id)
            } else {
                e.into()
            }
        })?;

        map_to_account(&user)
    }

    async fn load_accounts(&self) -> StorageResult<Vec<Account>> {
        let (client, ctx) = self.session().await?;
        let users = client.find_users(&ctx, "").await?;

        let mut accounts = Vec::with_capacity(users.len());
        for user in &users {
            match map_to_account(user) {
                Ok(account) => accounts.push(account),
                Err(e) => {
                    tracing::warn!(error = %e, username = %user.username, "Skipping directory record");
                }
            }
        }

        tracing::debug!(
            loaded = accounts.len(),
            skipped = users.len() - accounts.len(),
            "Loaded accounts from directory"
        );
        Ok(accounts)
    }

    async fn delete_account(&self, _id: &str) -> StorageResult<()> {
        Err(StorageError::unsupported("delete_account on directory repository"))
    }

    async fn write_group(&self, _group: &mut Group) -> StorageResult<()> {
        Err(StorageError::unsupported("write_group on directory repository"))
    }

    async fn load_group(&self, _id: &str) -> StorageResult<Group> {
        Err(StorageError::unsupported("load_group on directory repository"))
    }

    async fn load_groups(&self) -> StorageResult<Vec<Group>> {
        Err(StorageError::unsupported("load_groups on directory repository"))
    }

    async fn delete_group(&self, _id: &str) -> StorageResult<()> {
        Err(StorageError::unsupported("delete_group on directory repository"))
    }
}
