//! Connection state shared by the directory-backed indexes.

use std::fmt;
use std::sync::Arc;

use idm_core::ServiceUser;
use idm_directory::{
    authenticated_context, CallContext, DirectoryClient, DirectoryConnector, JwtTokenProvider,
    TokenProvider,
};

use crate::error::{IndexError, IndexResult};
use crate::options::IndexOptions;

/// Directory connection parameters plus the client obtained by `init`.
///
/// Every call mints a fresh session token; nothing is cached besides the
/// client handle.
pub(crate) struct DirectorySession {
    provider_addr: String,
    service_user: ServiceUser,
    connector: Arc<dyn DirectoryConnector>,
    tokens: Arc<dyn TokenProvider>,
    client: Option<Arc<dyn DirectoryClient>>,
}

impl DirectorySession {
    /// Validates the connection parameters.
    pub(crate) fn from_options(opts: &IndexOptions) -> IndexResult<Self> {
        let connector = opts
            .connector
            .clone()
            .ok_or_else(|| IndexError::config("no directory connector configured"))?;

        let tokens: Arc<dyn TokenProvider> = match &opts.token_provider {
            Some(provider) => Arc::clone(provider),
            None => Arc::new(JwtTokenProvider::new(&opts.jwt_secret).map_err(|e| {
                IndexError::config(format!("invalid token manager settings: {e}"))
            })?),
        };

        Ok(Self {
            provider_addr: opts.provider_addr.clone(),
            service_user: opts.service_user.clone(),
            connector,
            tokens,
            client: None,
        })
    }

    /// Connects to the directory. A second call keeps the existing client.
    pub(crate) async fn connect(&mut self) -> IndexResult<()> {
        if self.client.is_some() {
            return Ok(());
        }

        let client = self.connector.connect(&self.provider_addr).await?;
        tracing::debug!(addr = %self.provider_addr, "Connected to directory service");
        self.client = Some(client);
        Ok(())
    }

    /// Returns the client together with a freshly authenticated context.
    pub(crate) async fn call(&self) -> IndexResult<(&dyn DirectoryClient, CallContext)> {
        let client = self
            .client
            .as_deref()
            .ok_or_else(|| IndexError::NotInitialized(self.provider_addr.clone()))?;
        let ctx = authenticated_context(self.tokens.as_ref(), &self.service_user).await?;
        Ok((client, ctx))
    }

    /// Fails unless `connect` has completed.
    pub(crate) fn ensure_connected(&self) -> IndexResult<()> {
        match self.client {
            Some(_) => Ok(()),
            None => Err(IndexError::NotInitialized(self.provider_addr.clone())),
        }
    }
}

impl fmt::Debug for DirectorySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorySession")
            .field("provider_addr", &self.provider_addr)
            .field("service_user", &self.service_user.username)
            .field("connected", &self.client.is_some())
            .finish()
    }
}
