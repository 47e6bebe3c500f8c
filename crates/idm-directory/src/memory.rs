//! In-process directory service.
//!
//! Behaves like a remote user provider: calls without a session token are
//! rejected, claim lookups are exact, and free-text filters match
//! case-insensitively on id, username, mail and display name. Integer
//! claims (`uid`, `gid`) are answered from the opaque attribute bag.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::client::{CallContext, DirectoryClient};
use crate::error::{DirectoryError, DirectoryResult, StatusCode};
use crate::token::JwtTokenProvider;
use crate::types::{UserId, UserRecord};

/// Directory backed by an in-memory list of records.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<UserRecord>>,
    verifier: Option<JwtTokenProvider>,
    calls: AtomicUsize,
}

impl InMemoryDirectory {
    /// Creates an empty directory that accepts any non-empty token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `users`.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Verifies every session token with `verifier`.
    #[must_use]
    pub fn with_token_verifier(mut self, verifier: JwtTokenProvider) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Adds a record.
    pub fn insert(&self, user: UserRecord) {
        self.users.write().push(user);
    }

    /// Returns the number of authenticated calls served.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_session(&self, ctx: &CallContext) -> DirectoryResult<()> {
        let token = ctx
            .token()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DirectoryError::Unauthenticated("missing session token".to_string()))?;

        if let Some(verifier) = &self.verifier {
            verifier
                .verify(token)
                .map_err(|e| DirectoryError::Unauthenticated(e.to_string()))?;
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn opaque_text(user: &UserRecord, key: &str) -> Option<String> {
    user.opaque_i64(key).ok().flatten().map(|v| v.to_string())
}

fn claim_matches(user: &UserRecord, claim: &str, value: &str) -> DirectoryResult<bool> {
    let matched = match claim {
        "userid" => user.id.as_ref().is_some_and(|id| id.opaque_id == value),
        "mail" => user.mail == value,
        "username" => user.username == value,
        "uid" | "gid" => opaque_text(user, claim).as_deref() == Some(value),
        other => {
            return Err(DirectoryError::status(
                StatusCode::InvalidArgument,
                format!("unsupported claim: {other}"),
            ))
        }
    };
    Ok(matched)
}

fn filter_matches(user: &UserRecord, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    let opaque_id = user.id.as_ref().map_or("", |id| id.opaque_id.as_str());
    [
        opaque_id,
        user.username.as_str(),
        user.mail.as_str(),
        user.display_name.as_str(),
    ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn get_user_by_claim(
        &self,
        ctx: &CallContext,
        claim: &str,
        value: &str,
    ) -> DirectoryResult<Vec<UserRecord>> {
        self.check_session(ctx)?;

        let users = self.users.read();
        let mut matches = Vec::new();
        for user in users.iter() {
            if claim_matches(user, claim, value)? {
                matches.push(user.clone());
            }
        }

        if matches.is_empty() {
            return Err(DirectoryError::NotFound(format!("{claim}={value}")));
        }
        Ok(matches)
    }

    async fn find_users(&self, ctx: &CallContext, filter: &str) -> DirectoryResult<Vec<UserRecord>> {
        self.check_session(ctx)?;

        Ok(self
            .users
            .read()
            .iter()
            .filter(|user| filter_matches(user, filter))
            .cloned()
            .collect())
    }

    async fn get_user(&self, ctx: &CallContext, id: &UserId) -> DirectoryResult<UserRecord> {
        self.check_session(ctx)?;

        self.users
            .read()
            .iter()
            .find(|user| {
                user.id.as_ref().is_some_and(|uid| {
                    uid.opaque_id == id.opaque_id && (id.idp.is_empty() || uid.idp == id.idp)
                })
            })
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(format!("{}@{}", id.opaque_id, id.idp)))
    }
}
