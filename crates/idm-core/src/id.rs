//! Canonical record identifiers.
//!
//! Accounts are addressed across federated identity sources by
//! `<opaque-id>@<issuer>`. The identifier is stable for the lifetime of the
//! account and never reused.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Composite `opaque-id@issuer` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordId {
    /// Identifier assigned by the issuing identity source.
    pub opaque_id: String,
    /// Issuer (identity provider) of the record. May be empty.
    pub issuer: String,
}

impl RecordId {
    /// Creates an identifier from its parts.
    #[must_use]
    pub fn new(opaque_id: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            opaque_id: opaque_id.into(),
            issuer: issuer.into(),
        }
    }

    /// Splits a canonical identifier at the first `@`.
    ///
    /// Input without `@` is taken as an opaque id with an empty issuer
    /// rather than being rejected.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.split_once('@') {
            Some((opaque_id, issuer)) => Self::new(opaque_id, issuer),
            None => Self::new(value, ""),
        }
    }

    /// Returns true if the identifier carries an issuer.
    #[must_use]
    pub fn has_issuer(&self) -> bool {
        !self.issuer.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.opaque_id, self.issuer)
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_opaque_id_and_issuer() {
        let id = RecordId::parse("alice@example.org");
        assert_eq!(id.opaque_id, "alice");
        assert_eq!(id.issuer, "example.org");
        assert!(id.has_issuer());
    }

    #[test]
    fn missing_issuer_is_empty() {
        let id = RecordId::parse("alice");
        assert_eq!(id.opaque_id, "alice");
        assert_eq!(id.issuer, "");
        assert!(!id.has_issuer());
    }

    #[test]
    fn only_first_at_separates() {
        let id = RecordId::parse("alice@idp@example.org");
        assert_eq!(id.opaque_id, "alice");
        assert_eq!(id.issuer, "idp@example.org");
    }

    #[test]
    fn renders_canonical_form() {
        assert_eq!(
            RecordId::new("4c510ada", "https://idp.example.org").to_string(),
            "4c510ada@https://idp.example.org"
        );
    }

    #[test]
    fn serializes_as_string() {
        let id = RecordId::new("alice", "example.org");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"alice@example.org\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
