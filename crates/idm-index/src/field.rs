//! Static field table.
//!
//! Indexes address a field by logical name and record kind. The table maps
//! each pair to its value kind, the directory claim that answers exact
//! lookups, and whether the directory's free-text filter covers the field.
//! Descriptors outside the table are rejected when an index is built.

use std::fmt;

use idm_directory::UserRecord;

use crate::error::{IndexError, IndexResult};

/// Kind of record an index covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// User accounts.
    Account,
    /// Groups.
    Group,
}

impl RecordKind {
    /// Resolves a configured type name such as `"account"` or `"Group"`.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("account") {
            Some(Self::Account)
        } else if name.eq_ignore_ascii_case("group") {
            Some(Self::Group)
        } else {
            None
        }
    }

    /// Returns the canonical type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Group => "group",
        }
    }

    fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Account => ACCOUNT_FIELDS,
            Self::Group => GROUP_FIELDS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text.
    Text,
    /// Signed integer.
    Integer,
}

/// Where a field's value lives on a directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Opaque part of the record id.
    OpaqueId,
    /// Login name.
    Username,
    /// Mail address.
    Mail,
    /// Display name.
    DisplayName,
    /// Decoded `uid` opaque attribute.
    Uid,
    /// Decoded `gid` opaque attribute.
    Gid,
}

impl Attribute {
    /// Reads the attribute as text.
    ///
    /// Returns `None` when the record has no id or the opaque value is
    /// missing or undecodable.
    #[must_use]
    pub fn read(self, user: &UserRecord) -> Option<String> {
        match self {
            Self::OpaqueId => user.id.as_ref().map(|id| id.opaque_id.clone()),
            Self::Username => Some(user.username.clone()),
            Self::Mail => Some(user.mail.clone()),
            Self::DisplayName => Some(user.display_name.clone()),
            Self::Uid => opaque_text(user, "uid"),
            Self::Gid => opaque_text(user, "gid"),
        }
    }
}

fn opaque_text(user: &UserRecord, key: &str) -> Option<String> {
    user.opaque_i64(key).ok().flatten().map(|v| v.to_string())
}

/// One row of the field table.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Logical field name.
    pub name: &'static str,
    /// Value shape.
    pub value_kind: ValueKind,
    /// Directory claim for exact lookups, if any.
    pub claim: Option<&'static str>,
    /// Whether the directory free-text filter matches this field.
    pub searchable: bool,
    /// Record attribute holding the value.
    pub attribute: Attribute,
}

const ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "Id",
        value_kind: ValueKind::Text,
        claim: Some("userid"),
        searchable: true,
        attribute: Attribute::OpaqueId,
    },
    FieldSpec {
        name: "Mail",
        value_kind: ValueKind::Text,
        claim: Some("mail"),
        searchable: true,
        attribute: Attribute::Mail,
    },
    FieldSpec {
        name: "OnPremisesSamAccountName",
        value_kind: ValueKind::Text,
        claim: Some("username"),
        searchable: true,
        attribute: Attribute::Username,
    },
    FieldSpec {
        name: "PreferredName",
        value_kind: ValueKind::Text,
        claim: Some("username"),
        searchable: true,
        attribute: Attribute::Username,
    },
    FieldSpec {
        name: "DisplayName",
        value_kind: ValueKind::Text,
        claim: None,
        searchable: true,
        attribute: Attribute::DisplayName,
    },
    FieldSpec {
        name: "UidNumber",
        value_kind: ValueKind::Integer,
        claim: Some("uid"),
        searchable: false,
        attribute: Attribute::Uid,
    },
    FieldSpec {
        name: "GidNumber",
        value_kind: ValueKind::Integer,
        claim: Some("gid"),
        searchable: false,
        attribute: Attribute::Gid,
    },
];

// The directory serves no group queries, so group fields carry no claim.
const GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "Id",
        value_kind: ValueKind::Text,
        claim: None,
        searchable: false,
        attribute: Attribute::OpaqueId,
    },
    FieldSpec {
        name: "DisplayName",
        value_kind: ValueKind::Text,
        claim: None,
        searchable: false,
        attribute: Attribute::DisplayName,
    },
    FieldSpec {
        name: "OnPremisesSamAccountName",
        value_kind: ValueKind::Text,
        claim: None,
        searchable: false,
        attribute: Attribute::Username,
    },
    FieldSpec {
        name: "GidNumber",
        value_kind: ValueKind::Integer,
        claim: None,
        searchable: false,
        attribute: Attribute::Gid,
    },
];

/// A (field, record kind) pair validated against the field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    record_kind: RecordKind,
    spec: &'static FieldSpec,
}

impl FieldDescriptor {
    /// Looks up `field` for `record_kind`.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if the field is not in the table.
    pub fn resolve(record_kind: RecordKind, field: &str) -> IndexResult<Self> {
        record_kind
            .fields()
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| Self { record_kind, spec })
            .ok_or_else(|| IndexError::config(format!("unknown field {record_kind}.{field}")))
    }

    /// Looks up `field` for a configured type name.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error for an unknown type name or field.
    pub fn for_type(type_name: &str, field: &str) -> IndexResult<Self> {
        let record_kind = RecordKind::from_type_name(type_name)
            .ok_or_else(|| IndexError::config(format!("unknown record type '{type_name}'")))?;
        Self::resolve(record_kind, field)
    }

    /// Returns the logical field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Returns the record kind.
    #[must_use]
    pub const fn record_kind(&self) -> RecordKind {
        self.record_kind
    }

    /// Returns the value kind.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.spec.value_kind
    }

    /// Returns the directory claim for exact lookups.
    #[must_use]
    pub const fn claim(&self) -> Option<&'static str> {
        self.spec.claim
    }

    /// Returns true if the directory free-text filter covers this field.
    #[must_use]
    pub const fn is_searchable(&self) -> bool {
        self.spec.searchable
    }

    /// Returns the record attribute holding the value.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.spec.attribute
    }

    /// Returns true for the record identifier field.
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.spec.attribute == Attribute::OpaqueId
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.record_kind, self.spec.name)
    }
}
