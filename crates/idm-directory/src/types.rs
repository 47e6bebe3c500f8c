//! Backend-native user records.
//!
//! These mirror what the user provider returns on the wire. Normalization
//! into canonical accounts happens in the repository; indexes only read ids
//! and the indexed attribute.

use std::collections::HashMap;

use idm_core::RecordId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a user at its identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UserId {
    /// Opaque id assigned by the identity provider.
    pub opaque_id: String,
    /// Identity provider (issuer).
    pub idp: String,
}

impl UserId {
    /// Creates a user id.
    #[must_use]
    pub fn new(opaque_id: impl Into<String>, idp: impl Into<String>) -> Self {
        Self {
            opaque_id: opaque_id.into(),
            idp: idp.into(),
        }
    }

    /// Returns the canonical record identifier.
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        RecordId::new(self.opaque_id.clone(), self.idp.clone())
    }
}

impl From<&RecordId> for UserId {
    fn from(id: &RecordId) -> Self {
        Self::new(id.opaque_id.clone(), id.issuer.clone())
    }
}

/// A tagged value in a record's opaque attribute bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueEntry {
    /// Encoding of `value`, e.g. `plain` or `json`.
    pub decoder: String,
    /// Encoded value.
    pub value: Vec<u8>,
}

impl OpaqueEntry {
    /// Creates a `plain` entry holding UTF-8 text.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            decoder: "plain".to_string(),
            value: value.into().into_bytes(),
        }
    }

    /// Creates a `json` entry.
    #[must_use]
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            decoder: "json".to_string(),
            value: value.to_string().into_bytes(),
        }
    }

    /// Decodes the entry as an integer.
    ///
    /// Returns `Ok(None)` for decoders this layer does not recognize.
    ///
    /// ## Errors
    ///
    /// Returns an error if the decoder is recognized but the value is not
    /// an integer.
    pub fn decode_i64(&self) -> Result<Option<i64>, OpaqueError> {
        let invalid = || OpaqueError::InvalidValue {
            decoder: self.decoder.clone(),
            value: String::from_utf8_lossy(&self.value).into_owned(),
        };
        match self.decoder.as_str() {
            "plain" => {
                let text = std::str::from_utf8(&self.value).map_err(|_| invalid())?;
                text.trim().parse().map(Some).map_err(|_| invalid())
            }
            "json" => serde_json::from_slice::<i64>(&self.value)
                .map(Some)
                .map_err(|_| invalid()),
            _ => Ok(None),
        }
    }
}

/// Failure to decode an opaque attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpaqueError {
    /// Recognized decoder, malformed value.
    #[error("opaque value '{value}' is not a valid {decoder} integer")]
    InvalidValue {
        /// Decoder tag of the entry.
        decoder: String,
        /// Raw value, lossily decoded.
        value: String,
    },
}

/// A user as returned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    /// Identifier; absent on malformed records.
    pub id: Option<UserId>,
    /// Login name.
    pub username: String,
    /// Email address.
    pub mail: String,
    /// Whether the email address is verified.
    pub mail_verified: bool,
    /// Human readable name.
    pub display_name: String,
    /// Groups the user belongs to.
    pub groups: Vec<String>,
    /// Opaque attribute bag (e.g. `uid`, `gid`).
    pub opaque: HashMap<String, OpaqueEntry>,
}

impl UserRecord {
    /// Creates a record with the given identifier.
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Sets the login name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
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

    /// Adds an opaque attribute.
    #[must_use]
    pub fn with_opaque(mut self, key: impl Into<String>, entry: OpaqueEntry) -> Self {
        self.opaque.insert(key.into(), entry);
        self
    }

    /// Returns the canonical identifier, if the record has an id.
    #[must_use]
    pub fn record_id(&self) -> Option<RecordId> {
        self.id.as_ref().map(UserId::record_id)
    }

    /// Decodes an integer opaque attribute.
    ///
    /// Absent keys and unrecognized decoders yield `Ok(None)`.
    ///
    /// ## Errors
    ///
    /// Returns an error if a recognized decoder holds a malformed value.
    pub fn opaque_i64(&self, key: &str) -> Result<Option<i64>, OpaqueError> {
        match self.opaque.get(key) {
            Some(entry) => entry.decode_i64(),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_json_decoders() {
        assert_eq!(OpaqueEntry::plain("1000").decode_i64(), Ok(Some(1000)));
        assert_eq!(
            OpaqueEntry::json(&serde_json::json!(30000)).decode_i64(),
            Ok(Some(30000))
        );
    }

    #[test]
    fn unknown_decoder_is_ignored() {
        let entry = OpaqueEntry {
            decoder: "xml".to_string(),
            value: b"<uid>1</uid>".to_vec(),
        };
        assert_eq!(entry.decode_i64(), Ok(None));
    }

    #[test]
    fn malformed_plain_value_is_an_error() {
        assert!(OpaqueEntry::plain("one thousand").decode_i64().is_err());
    }

    #[test]
    fn absent_key_is_none() {
        let record = UserRecord::new(UserId::new("alice", "example.org"));
        assert_eq!(record.opaque_i64("uid"), Ok(None));
        assert_eq!(
            record.record_id().map(|id| id.to_string()),
            Some("alice@example.org".to_string())
        );
    }
}
