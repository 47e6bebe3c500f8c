//! Account record.

use idm_core::RecordId;
use serde::{Deserialize, Serialize};

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    // === Identity ===
    /// Canonical `opaque-id@issuer` identifier.
    pub id: RecordId,

    // === Profile ===
    /// Human readable name.
    pub display_name: String,
    /// Login name.
    pub on_premises_sam_account_name: String,
    /// Preferred login name.
    pub preferred_name: String,
    /// Email address.
    pub mail: String,

    // === POSIX ===
    /// Numeric user id, 0 when unknown.
    pub uid_number: i64,
    /// Numeric primary group id, 0 when unknown.
    pub gid_number: i64,
}

impl Account {
    /// Creates an empty account with the given identifier.
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Sets both login names.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.on_premises_sam_account_name.clone_from(&username);
        self.preferred_name = username;
        self
    }

    /// Sets the mail address.
    #[must_use]
    pub fn with_mail(mut self, mail: impl Into<String>) -> Self {
        self.mail = mail.into();
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Returns true if the account carries POSIX ids.
    #[must_use]
    pub const fn has_posix_ids(&self) -> bool {
        self.uid_number != 0 || self.gid_number != 0
    }
}
