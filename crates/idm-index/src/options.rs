//! Index construction options.

use std::fmt;
use std::sync::Arc;

use idm_core::config::{Bound, IndexConfig};
use idm_core::{Config, ServiceUser};
use idm_directory::{DirectoryConnector, TokenProvider};

/// Everything an index constructor needs.
///
/// Options are built from configuration or with the builder methods below.
/// The connector is mandatory for directory indexes; a token provider may
/// be injected, otherwise one is derived from `jwt_secret` when the index
/// is constructed.
#[derive(Clone, Default)]
pub struct IndexOptions {
    /// Record type name ("account" or "group").
    pub type_name: String,
    /// Logical field name.
    pub index_by: String,
    /// Compare values case-insensitively.
    pub case_insensitive: bool,
    /// Allocation range for autoincrement indexes.
    pub bound: Option<Bound>,
    /// Address of the directory service.
    pub provider_addr: String,
    /// Secret for signing session tokens.
    pub jwt_secret: String,
    /// Account tokens are minted for.
    pub service_user: ServiceUser,
    /// Resolves `provider_addr` to a client.
    pub connector: Option<Arc<dyn DirectoryConnector>>,
    /// Replaces the token provider derived from `jwt_secret`.
    pub token_provider: Option<Arc<dyn TokenProvider>>,
}

impl IndexOptions {
    /// Creates options for `index_by` on `type_name`.
    #[must_use]
    pub fn new(type_name: impl Into<String>, index_by: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            index_by: index_by.into(),
            ..Self::default()
        }
    }

    /// Builds options for one configured index.
    #[must_use]
    pub fn from_config(
        config: &Config,
        index: &IndexConfig,
        connector: Arc<dyn DirectoryConnector>,
    ) -> Self {
        Self {
            type_name: index.type_name.clone(),
            index_by: index.index_by.clone(),
            case_insensitive: index.case_insensitive,
            bound: index.bound,
            provider_addr: config.directory.provider_addr.clone(),
            jwt_secret: config.token_manager.jwt_secret.clone(),
            service_user: config.service_user.clone(),
            connector: Some(connector),
            token_provider: None,
        }
    }

    /// Sets case-insensitive matching.
    #[must_use]
    pub const fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Sets the allocation bound.
    #[must_use]
    pub const fn with_bound(mut self, bound: Bound) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Sets the directory address.
    #[must_use]
    pub fn with_provider_addr(mut self, addr: impl Into<String>) -> Self {
        self.provider_addr = addr.into();
        self
    }

    /// Sets the token signing secret.
    #[must_use]
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    /// Sets the service user.
    #[must_use]
    pub fn with_service_user(mut self, user: ServiceUser) -> Self {
        self.service_user = user;
        self
    }

    /// Sets the directory connector.
    #[must_use]
    pub fn with_connector(mut self, connector: Arc<dyn DirectoryConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Injects a token provider.
    #[must_use]
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }
}

impl fmt::Debug for IndexOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexOptions")
            .field("type_name", &self.type_name)
            .field("index_by", &self.index_by)
            .field("case_insensitive", &self.case_insensitive)
            .field("bound", &self.bound)
            .field("provider_addr", &self.provider_addr)
            .field("jwt_secret", &"[REDACTED]")
            .field("service_user", &self.service_user.username)
            .field("connector", &self.connector.is_some())
            .field("token_provider", &self.token_provider.is_some())
            .finish()
    }
}
