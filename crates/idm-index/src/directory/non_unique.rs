use async_trait::async_trait;
use idm_core::config::DIRECTORY_BACKEND;
use idm_directory::UserRecord;

use super::session::DirectorySession;
use super::{backend_filter, push_unique, values_equal};
use crate::error::{IndexError, IndexResult};
use crate::field::{Attribute, FieldDescriptor, RecordKind};
use crate::index::{Index, IndexKind};
use crate::options::IndexOptions;

/// Resolves a value to any number of records.
///
/// Supports the record id, where a lookup simply echoes its input, and the
/// display name, which is matched through the directory's free-text filter.
#[derive(Debug)]
pub struct NonUniqueIndex {
    type_name: String,
    field: FieldDescriptor,
    case_insensitive: bool,
    session: DirectorySession,
}

impl NonUniqueIndex {
    /// Creates an uninitialized index.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error for fields other than `Id` and
    /// `DisplayName` on accounts, a missing connector, or unusable token
    /// settings.
    pub fn new(opts: IndexOptions) -> IndexResult<Self> {
        let field = FieldDescriptor::for_type(&opts.type_name, &opts.index_by)?;
        let supported = field.record_kind() == RecordKind::Account
            && matches!(field.attribute(), Attribute::OpaqueId | Attribute::DisplayName);
        if !supported {
            return Err(IndexError::config(format!(
                "non-unique directory index not supported for {field}"
            )));
        }
        let session = DirectorySession::from_options(&opts)?;

        Ok(Self {
            type_name: opts.type_name,
            field,
            case_insensitive: opts.case_insensitive,
            session,
        })
    }

    async fn query(&self, value: &str) -> IndexResult<Vec<UserRecord>> {
        let (client, ctx) = self.session.call().await?;
        Ok(client
            .find_users(&ctx, &backend_filter(&self.field, value))
            .await?)
    }
}

#[async_trait]
impl Index for NonUniqueIndex {
    async fn init(&mut self) -> IndexResult<()> {
        self.session.connect().await?;
        tracing::debug!(field = %self.field, "Initialized non-unique index");
        Ok(())
    }

    async fn lookup(&self, value: &str) -> IndexResult<Vec<String>> {
        if self.field.is_identifier() {
            self.session.ensure_connected()?;
            return Ok(vec![value.to_string()]);
        }

        let mut ids = Vec::new();
        for user in self.query(value).await? {
            if !values_equal(&user.display_name, value, self.case_insensitive) {
                continue;
            }
            if let Some(id) = user.record_id() {
                push_unique(&mut ids, id.to_string());
            }
        }

        tracing::debug!(field = %self.field, matches = ids.len(), "Non-unique lookup");
        Ok(ids)
    }

    async fn search(&self, pattern: &str) -> IndexResult<Vec<String>> {
        let mut ids = Vec::new();
        for id in self.query(pattern).await?.iter().filter_map(|u| u.record_id()) {
            push_unique(&mut ids, id.to_string());
        }

        tracing::debug!(field = %self.field, matches = ids.len(), "Non-unique search");
        Ok(ids)
    }

    fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn index_by(&self) -> &FieldDescriptor {
        &self.field
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn kind(&self) -> IndexKind {
        IndexKind::NonUnique
    }

    fn backend(&self) -> &str {
        DIRECTORY_BACKEND
    }
}
