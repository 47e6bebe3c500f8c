//! Session tokens for outgoing directory calls.
//!
//! Every call is authenticated as the configured service user with a token
//! minted just for that call. Tokens are short-lived and never reused.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use idm_core::ServiceUser;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenError;

/// Issues session tokens for a service identity.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Mints a token identifying `user`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the token cannot be issued. Callers surface this
    /// as an authentication failure and never retry.
    async fn authenticate(&self, user: &ServiceUser) -> Result<String, TokenError>;
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Issuer.
    pub iss: String,
    /// Subject - the service user's id.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Token id.
    pub jti: String,
    /// Service user login name.
    pub username: String,
    /// Service user numeric uid.
    pub uid: i64,
    /// Service user numeric gid.
    pub gid: i64,
}

/// HMAC-signed JWT session tokens.
#[derive(Clone)]
pub struct JwtTokenProvider {
    issuer: String,
    lifespan: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenProvider")
            .field("issuer", &self.issuer)
            .field("lifespan", &self.lifespan)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtTokenProvider {
    /// Default token lifespan in seconds.
    pub const DEFAULT_LIFESPAN: i64 = 60;

    /// Default issuer.
    pub const DEFAULT_ISSUER: &'static str = "idm";

    /// Creates a provider signing with the shared `secret`.
    ///
    /// ## Errors
    ///
    /// Returns `TokenError::Configuration` if the secret is empty.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Configuration("jwt secret is empty".to_string()));
        }
        Ok(Self {
            issuer: Self::DEFAULT_ISSUER.to_string(),
            lifespan: Self::DEFAULT_LIFESPAN,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Sets the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the lifespan in seconds.
    #[must_use]
    pub const fn with_lifespan(mut self, seconds: i64) -> Self {
        self.lifespan = seconds;
        self
    }

    /// Signs claims for `user`.
    ///
    /// ## Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn mint(&self, user: &ServiceUser) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            iss: self.issuer.clone(),
            sub: user.uuid.clone(),
            exp: (now + Duration::seconds(self.lifespan)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            username: user.username.clone(),
            uid: user.uid,
            gid: user.gid,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validates a token and returns its claims.
    ///
    /// ## Errors
    ///
    /// Returns `TokenError::Validation` for bad signatures, foreign issuers
    /// and expired tokens.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Validation(e.to_string()))
    }
}

#[async_trait]
impl TokenProvider for JwtTokenProvider {
    async fn authenticate(&self, user: &ServiceUser) -> Result<String, TokenError> {
        self.mint(user)
    }
}
