//! Group record.

use idm_core::RecordId;
use serde::{Deserialize, Serialize};

/// A group of accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Canonical `opaque-id@issuer` identifier.
    pub id: RecordId,
    /// Human readable name.
    pub display_name: String,
    /// Group name.
    pub on_premises_sam_account_name: String,
    /// Numeric group id, 0 when unknown.
    pub gid_number: i64,
    /// Member account identifiers.
    pub members: Vec<RecordId>,
}

impl Group {
    /// Creates an empty group with the given identifier.
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Returns true if the account is a direct member.
    #[must_use]
    pub fn has_member(&self, account: &RecordId) -> bool {
        self.members.contains(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let alice = RecordId::parse("alice@example.org");
        let mut group = Group::new(RecordId::parse("staff@example.org")).with_display_name("Staff");
        assert!(!group.has_member(&alice));

        group.members.push(alice.clone());
        assert!(group.has_member(&alice));
    }
}
