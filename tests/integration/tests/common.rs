//! Common test utilities and fixtures.

use std::sync::Arc;

use idm_core::config::{default_indexes, DirectoryConfig, LogConfig, TokenManagerConfig};
use idm_core::{Config, ServiceUser};
use idm_directory::{
    InMemoryDirectory, JwtTokenProvider, OpaqueEntry, StaticConnector, UserId, UserRecord,
};
use idm_index::{register_directory_indexes, IndexRegistry, IndexRegistryBuilder, IndexSet};
use idm_storage::DirectoryRepository;

/// Secret shared by the token provider and the directory's verifier.
pub const SECRET: &str = "Pive-Fumkiu4";

/// Issuer of every fixture user.
pub const ISSUER: &str = "https://idp.example.org";

/// Indexes and repository wired to one in-memory directory.
pub struct TestEnv {
    /// The directory backend.
    pub directory: Arc<InMemoryDirectory>,
    /// Configuration the components were built from.
    pub config: Config,
    /// Initialized default index set.
    pub indexes: IndexSet,
    /// Account repository.
    pub repository: DirectoryRepository,
}

impl TestEnv {
    /// Creates an environment holding the default fixture users.
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_users(default_users()).await
    }

    /// Creates an environment holding `users`.
    pub async fn with_users(users: Vec<UserRecord>) -> anyhow::Result<Self> {
        let _ = idm_core::logging::init(&LogConfig {
            level: "idm_index=debug,idm_storage=debug".to_string(),
            ..LogConfig::default()
        });

        let directory = Arc::new(
            InMemoryDirectory::with_users(users).with_token_verifier(JwtTokenProvider::new(SECRET)?),
        );
        let config = config();

        let indexes = IndexSet::from_config(&registry()?, &config, connector(&directory)).await?;
        let repository = DirectoryRepository::new(&config, connector(&directory))?;

        Ok(Self {
            directory,
            config,
            indexes,
            repository,
        })
    }

    /// Canonical identifier of a fixture user.
    pub fn id(opaque_id: &str) -> String {
        format!("{opaque_id}@{ISSUER}")
    }
}

/// Configuration with the default account indexes.
pub fn config() -> Config {
    Config {
        directory: DirectoryConfig {
            provider_addr: "localhost:9144".to_string(),
        },
        token_manager: TokenManagerConfig {
            jwt_secret: SECRET.to_string(),
        },
        service_user: ServiceUser {
            uuid: "95cb8724-03b2-11eb-a0a6-c33ef8ef53ad".to_string(),
            username: "idm-service".to_string(),
            uid: 0,
            gid: 0,
        },
        log: LogConfig::default(),
        indexes: default_indexes(),
    }
}

/// Registry with the directory variants.
pub fn registry() -> anyhow::Result<IndexRegistry> {
    let mut builder = IndexRegistryBuilder::new();
    register_directory_indexes(&mut builder)?;
    Ok(builder.build())
}

/// Connector resolving every address to `directory`.
pub fn connector(directory: &Arc<InMemoryDirectory>) -> Arc<StaticConnector> {
    Arc::new(StaticConnector::new(directory.clone()))
}

/// Builds a fixture user.
pub fn user(opaque_id: &str, username: &str, display_name: &str, uid: i64) -> UserRecord {
    UserRecord::new(UserId::new(opaque_id, ISSUER))
        .with_username(username)
        .with_mail(format!("{username}@example.org"))
        .with_display_name(display_name)
        .with_opaque("uid", OpaqueEntry::plain(uid.to_string()))
        .with_opaque("gid", OpaqueEntry::plain("30000"))
}

/// The default directory population.
pub fn default_users() -> Vec<UserRecord> {
    vec![
        user("4c510ada", "einstein", "Albert Einstein", 20000),
        user("f7fbf8c8", "marie", "Marie Curie", 20001),
        user("932b4540", "richard", "Richard Feynman", 20002),
        user("058bff95", "moss", "Maurice Moss", 20003),
    ]
}
