//! Configuration for directory-backed indexes and repositories.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults, or deserialized from any serde source.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory service connection.
    pub directory: DirectoryConfig,
    /// Token signing configuration.
    pub token_manager: TokenManagerConfig,
    /// Privileged account tokens are minted for.
    pub service_user: ServiceUser,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
    /// Indexes to build at startup.
    #[serde(default = "default_indexes")]
    pub indexes: Vec<IndexConfig>,
}

/// Directory service connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Address of the user provider service.
    pub provider_addr: String,
}

/// Token signing configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenManagerConfig {
    /// Shared secret used to sign session tokens.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
}

impl std::fmt::Debug for TokenManagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManagerConfig")
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}

/// Service identity that every outgoing call is authenticated as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUser {
    /// Opaque id of the service account.
    pub uuid: String,
    /// Login name of the service account.
    pub username: String,
    /// Numeric user id.
    #[serde(default)]
    pub uid: i64,
    /// Numeric group id.
    #[serde(default)]
    pub gid: i64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level filter when `RUST_LOG` is unset.
    pub level: String,
    /// Multi-line human readable output.
    pub pretty: bool,
    /// ANSI colors.
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: false,
            color: true,
        }
    }
}

/// Inclusive numeric range for autoincrement indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bound {
    /// Lowest value that may be allocated.
    pub lower: i64,
    /// Highest value that may be allocated.
    pub upper: i64,
}

impl Bound {
    /// Creates a new bound.
    #[must_use]
    pub const fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    /// Returns true if `lower <= upper`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.lower <= self.upper
    }

    /// Returns true if the value lies within the range.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Declares one index to build at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Backend name the constructor is registered under.
    pub backend: String,
    /// Variant name ("unique", "non_unique", "autoincrement").
    pub kind: String,
    /// Record type name ("account" or "group").
    pub type_name: String,
    /// Logical field name, e.g. `Mail`.
    pub index_by: String,
    /// Compare values case-insensitively.
    #[serde(default)]
    pub case_insensitive: bool,
    /// Numeric range, autoincrement only.
    #[serde(default)]
    pub bound: Option<Bound>,
}

impl IndexConfig {
    /// Creates an index declaration for the directory backend.
    #[must_use]
    pub fn directory(
        kind: impl Into<String>,
        type_name: impl Into<String>,
        index_by: impl Into<String>,
    ) -> Self {
        Self {
            backend: DIRECTORY_BACKEND.to_string(),
            kind: kind.into(),
            type_name: type_name.into(),
            index_by: index_by.into(),
            case_insensitive: false,
            bound: None,
        }
    }

    /// Sets case-insensitive comparison.
    #[must_use]
    pub const fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Sets the numeric bound.
    #[must_use]
    pub const fn bound(mut self, bound: Bound) -> Self {
        self.bound = Some(bound);
        self
    }
}

/// Backend name of the remote directory service.
pub const DIRECTORY_BACKEND: &str = "directory";

/// The account index set used when configuration lists none.
#[must_use]
pub fn default_indexes() -> Vec<IndexConfig> {
    vec![
        IndexConfig::directory("unique", "account", "Mail").case_insensitive(true),
        IndexConfig::directory("unique", "account", "OnPremisesSamAccountName")
            .case_insensitive(true),
        IndexConfig::directory("unique", "account", "PreferredName").case_insensitive(true),
        IndexConfig::directory("unique", "account", "UidNumber"),
        IndexConfig::directory("unique", "account", "GidNumber"),
        IndexConfig::directory("non_unique", "account", "DisplayName"),
        IndexConfig::directory("non_unique", "account", "Id"),
    ]
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored if present.
    ///
    /// ## Errors
    ///
    /// Returns `Error::Configuration` if `IDM_JWT_SECRET` or
    /// `IDM_SERVICE_USER_UUID` is missing, or a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let provider_addr = env_or("IDM_PROVIDER_ADDR", "localhost:9144");

        let jwt_secret = std::env::var("IDM_JWT_SECRET").map_err(|_| {
            Error::Configuration("IDM_JWT_SECRET environment variable is required".to_string())
        })?;

        let uuid = std::env::var("IDM_SERVICE_USER_UUID").map_err(|_| {
            Error::Configuration(
                "IDM_SERVICE_USER_UUID environment variable is required".to_string(),
            )
        })?;

        let service_user = ServiceUser {
            uuid,
            username: env_or("IDM_SERVICE_USER_USERNAME", "idm-service"),
            uid: env_parse("IDM_SERVICE_USER_UID", 0)?,
            gid: env_parse("IDM_SERVICE_USER_GID", 0)?,
        };

        let log = LogConfig {
            level: env_or("IDM_LOG_LEVEL", "info"),
            pretty: env_parse("IDM_LOG_PRETTY", false)?,
            color: env_parse("IDM_LOG_COLOR", true)?,
        };

        tracing::debug!(
            provider_addr = %provider_addr,
            service_user = %service_user.username,
            "Loaded configuration from environment"
        );

        Ok(Self {
            directory: DirectoryConfig { provider_addr },
            token_manager: TokenManagerConfig { jwt_secret },
            service_user,
            log,
            indexes: default_indexes(),
        })
    }

    /// Validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns `Error::Configuration` for an empty address, secret or
    /// service user id, or an inverted autoincrement bound.
    pub fn validate(&self) -> Result<()> {
        if self.directory.provider_addr.is_empty() {
            return Err(Error::Configuration("provider address is empty".to_string()));
        }
        if self.token_manager.jwt_secret.is_empty() {
            return Err(Error::Configuration("jwt secret is empty".to_string()));
        }
        if self.service_user.uuid.is_empty() {
            return Err(Error::Configuration("service user uuid is empty".to_string()));
        }
        for index in &self.indexes {
            if let Some(bound) = index.bound {
                if !bound.is_valid() {
                    return Err(Error::Configuration(format!(
                        "index {}.{}: lower bound {} exceeds upper bound {}",
                        index.type_name, index.index_by, bound.lower, bound.upper
                    )));
                }
            }
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Configuration(format!("{key}: cannot parse '{raw}'"))),
        Err(_) => Ok(default),
    }
}
