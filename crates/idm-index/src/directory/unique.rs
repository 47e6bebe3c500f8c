use async_trait::async_trait;
use idm_core::config::DIRECTORY_BACKEND;
use idm_core::RecordId;
use idm_directory::UserRecord;

use super::session::DirectorySession;
use super::{backend_filter, contains, push_unique, values_equal};
use crate::error::{IndexError, IndexResult};
use crate::field::FieldDescriptor;
use crate::index::{Index, IndexKind};
use crate::options::IndexOptions;

/// Resolves a value to exactly one record.
///
/// Lookups go through the field's directory claim. When the index is
/// case-insensitive, the matches of a free-text query filtered by
/// case-insensitive equality are merged in. More than one distinct match
/// is reported as [`IndexError::Ambiguous`].
#[derive(Debug)]
pub struct UniqueIndex {
    type_name: String,
    field: FieldDescriptor,
    claim: &'static str,
    case_insensitive: bool,
    session: DirectorySession,
}

impl UniqueIndex {
    /// Creates an uninitialized index.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error for fields without a directory claim,
    /// a missing connector, or unusable token settings.
    pub fn new(opts: IndexOptions) -> IndexResult<Self> {
        let field = FieldDescriptor::for_type(&opts.type_name, &opts.index_by)?;
        let claim = field.claim().ok_or_else(|| {
            IndexError::config(format!("unique directory index not supported for {field}"))
        })?;
        let session = DirectorySession::from_options(&opts)?;

        Ok(Self {
            type_name: opts.type_name,
            field,
            claim,
            case_insensitive: opts.case_insensitive,
            session,
        })
    }

    fn matches(&self, user: &UserRecord, value: &str) -> bool {
        if self.field.is_identifier() {
            let wanted = RecordId::parse(value);
            let Some(id) = &user.id else {
                return false;
            };
            return values_equal(&id.opaque_id, &wanted.opaque_id, self.case_insensitive)
                && (!wanted.has_issuer() || id.idp == wanted.issuer);
        }

        self.field
            .attribute()
            .read(user)
            .is_some_and(|v| values_equal(&v, value, self.case_insensitive))
    }

    fn matching_ids(&self, users: &[UserRecord], value: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for user in users.iter().filter(|u| self.matches(u, value)) {
            match user.record_id() {
                Some(id) => push_unique(&mut ids, id.to_string()),
                None => tracing::debug!(field = %self.field, "Skipping matching record without id"),
            }
        }
        ids
    }
}

#[async_trait]
impl Index for UniqueIndex {
    async fn init(&mut self) -> IndexResult<()> {
        self.session.connect().await?;
        tracing::debug!(field = %self.field, "Initialized unique index");
        Ok(())
    }

    async fn lookup(&self, value: &str) -> IndexResult<Vec<String>> {
        let claim_value = if self.field.is_identifier() {
            RecordId::parse(value).opaque_id
        } else {
            value.to_string()
        };

        let (client, ctx) = self.session.call().await?;
        let candidates = match client.get_user_by_claim(&ctx, self.claim, &claim_value).await {
            Ok(users) => users,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let mut ids = self.matching_ids(&candidates, value);

        // The claim query is case-sensitive, so case variants only show up
        // through the free-text filter.
        if self.case_insensitive {
            let (client, ctx) = self.session.call().await?;
            let candidates = client
                .find_users(&ctx, &backend_filter(&self.field, value))
                .await?;
            for id in self.matching_ids(&candidates, value) {
                push_unique(&mut ids, id);
            }
        }

        tracing::debug!(field = %self.field, claim = self.claim, matches = ids.len(), "Unique lookup");

        match ids.len() {
            0 => Err(IndexError::NotFound {
                type_name: self.type_name.clone(),
                field: self.field.name().to_string(),
                value: value.to_string(),
            }),
            1 => Ok(ids),
            count => Err(IndexError::Ambiguous {
                type_name: self.type_name.clone(),
                field: self.field.name().to_string(),
                value: value.to_string(),
                count,
            }),
        }
    }

    async fn search(&self, pattern: &str) -> IndexResult<Vec<String>> {
        let (client, ctx) = self.session.call().await?;
        let users = client
            .find_users(&ctx, &backend_filter(&self.field, pattern))
            .await?;

        let mut ids = Vec::new();
        for user in &users {
            let Some(id) = user.record_id() else {
                continue;
            };
            let id = id.to_string();
            // Identifiers match on their canonical form so that a qualified
            // lookup value is also found by search.
            let haystack = if self.field.is_identifier() {
                Some(id.clone())
            } else {
                self.field.attribute().read(user)
            };
            if haystack.is_some_and(|h| contains(&h, pattern, self.case_insensitive)) {
                push_unique(&mut ids, id);
            }
        }

        tracing::debug!(field = %self.field, matches = ids.len(), "Unique search");
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
        IndexKind::Unique
    }

    fn backend(&self) -> &str {
        DIRECTORY_BACKEND
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use idm_directory::{InMemoryDirectory, UserId, UserRecord};

    use super::*;
    use crate::directory::testing::{directory, options, user, FailingTokens};

    async fn index(dir: &Arc<InMemoryDirectory>, field: &str, ci: bool) -> UniqueIndex {
        let mut idx =
            UniqueIndex::new(options(dir, "account", field).with_case_insensitive(ci)).unwrap();
        idx.init().await.unwrap();
        idx
    }

    #[tokio::test]
    async fn lookup_by_mail_returns_canonical_id() {
        let dir = directory();
        let idx = index(&dir, "Mail", false).await;

        let ids = idx.lookup("albert@example.org").await.unwrap();
        assert_eq!(ids, vec!["4c510ada@https://idp.example.org".to_string()]);
    }

    #[tokio::test]
    async fn case_insensitive_lookup_merges_filter_results() {
        let dir = directory();
        let idx = index(&dir, "Mail", true).await;

        let ids = idx.lookup("Albert@Example.ORG").await.unwrap();
        assert_eq!(ids, vec!["4c510ada@https://idp.example.org".to_string()]);
        assert_eq!(dir.call_count(), 2);
    }

    #[tokio::test]
    async fn case_twins_are_ambiguous_for_every_casing() {
        let dir = directory();
        dir.insert(user("aaaa0001", "twin1", "Twin@example.org", 20030));
        dir.insert(user("aaaa0002", "twin2", "twin@example.org", 20031));
        let idx = index(&dir, "Mail", true).await;

        for value in ["twin@example.org", "Twin@example.org", "TWIN@example.org"] {
            let err = idx.lookup(value).await.unwrap_err();
            assert!(
                matches!(err, IndexError::Ambiguous { count: 2, .. }),
                "{value}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn case_sensitive_lookup_does_not_fold() {
        let dir = directory();
        let idx = index(&dir, "Mail", false).await;

        let err = idx.lookup("Albert@Example.ORG").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn lookup_by_login_name_and_uid() {
        let dir = directory();

        let by_name = index(&dir, "PreferredName", false).await;
        assert_eq!(
            by_name.lookup("marie").await.unwrap(),
            vec!["f7fbf8c8@https://idp.example.org".to_string()]
        );

        let by_uid = index(&dir, "UidNumber", false).await;
        assert_eq!(
            by_uid.lookup("20002").await.unwrap(),
            vec!["932b4540@https://idp.example.org".to_string()]
        );
    }

    #[tokio::test]
    async fn lookup_by_id_checks_issuer_when_given() {
        let dir = directory();
        let idx = index(&dir, "Id", false).await;

        assert_eq!(idx.lookup("4c510ada").await.unwrap().len(), 1);
        assert_eq!(
            idx.lookup("4c510ada@https://idp.example.org").await.unwrap().len(),
            1
        );
        assert!(idx
            .lookup("4c510ada@https://other.example.org")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn multiple_matches_are_ambiguous() {
        let dir = directory();
        dir.insert(user("0a1b2c3d", "albert2", "albert@example.org", 20010));
        let idx = index(&dir, "Mail", false).await;

        let err = idx.lookup("albert@example.org").await.unwrap_err();
        assert!(matches!(err, IndexError::Ambiguous { count: 2, .. }));
    }

    #[tokio::test]
    async fn search_is_superset_of_lookup() {
        let dir = directory();
        let idx = index(&dir, "Mail", true).await;

        for value in ["albert@example.org", "ALBERT@example.org", "marie@example.org"] {
            let found = idx.lookup(value).await.unwrap();
            let searched = idx.search(value).await.unwrap();
            assert!(found.iter().all(|id| searched.contains(id)), "{value}");
        }

        assert_eq!(idx.search("example.org").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_on_uid_filters_locally() {
        let dir = directory();
        let idx = index(&dir, "UidNumber", false).await;

        let ids = idx.search("2000").await.unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(idx.search("20001").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn records_without_id_are_ignored() {
        let dir = directory();
        let mut anonymous = UserRecord::new(UserId::new("x", "y")).with_mail("ghost@example.org");
        anonymous.id = None;
        dir.insert(anonymous);
        let idx = index(&dir, "Mail", false).await;

        assert!(idx.lookup("ghost@example.org").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn queries_before_init_fail() {
        let dir = directory();
        let idx = UniqueIndex::new(options(&dir, "account", "Mail")).unwrap();

        let err = idx.lookup("albert@example.org").await.unwrap_err();
        assert!(matches!(err, IndexError::NotInitialized(_)));
    }

    #[tokio::test]
    async fn token_failures_surface_as_authentication_errors() {
        let dir = directory();
        let opts = options(&dir, "account", "Mail")
            .with_case_insensitive(true)
            .with_token_provider(Arc::new(FailingTokens));
        let mut idx = UniqueIndex::new(opts).unwrap();
        idx.init().await.unwrap();

        let err = idx.lookup("albert@example.org").await.unwrap_err();
        assert!(matches!(err, IndexError::Authentication(_)), "{err:?}");
        let err = idx.search("albert").await.unwrap_err();
        assert!(matches!(err, IndexError::Authentication(_)), "{err:?}");
        assert_eq!(dir.call_count(), 0);
    }

    #[tokio::test]
    async fn init_twice_is_noop() {
        let dir = directory();
        let mut idx = index(&dir, "Mail", false).await;
        idx.init().await.unwrap();
        assert_eq!(idx.kind(), IndexKind::Unique);
        assert_eq!(idx.backend(), "directory");
    }

    #[tokio::test]
    async fn mutations_are_unsupported() {
        let dir = directory();
        let idx = index(&dir, "Mail", false).await;

        assert!(idx.add("id", "v").await.unwrap_err().is_unsupported());
        assert!(idx.remove("id", "v").await.unwrap_err().is_unsupported());
        assert!(idx.update("id", "a", "b").await.unwrap_err().is_unsupported());
        assert!(idx.delete().await.unwrap_err().is_unsupported());
    }

    #[test]
    fn rejects_fields_without_claim() {
        let dir = directory();
        assert!(matches!(
            UniqueIndex::new(options(&dir, "account", "DisplayName")),
            Err(IndexError::Configuration(_))
        ));
        assert!(UniqueIndex::new(options(&dir, "group", "GidNumber")).is_err());
        assert!(UniqueIndex::new(options(&dir, "account", "Unknown")).is_err());
    }

    #[test]
    fn rejects_missing_secret() {
        let dir = directory();
        let opts = options(&dir, "account", "Mail").with_jwt_secret("");
        assert!(matches!(UniqueIndex::new(opts), Err(IndexError::Configuration(_))));
    }
}
