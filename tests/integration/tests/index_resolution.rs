//! Index lookups and searches against the directory.

use idm_index::{IndexError, IndexKind};

use crate::common::{user, TestEnv};

/// Tests that a mail lookup yields the canonical identifier.
#[tokio::test]
async fn test_mail_lookup_returns_canonical_id() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let ids = env.indexes.lookup("account", "Mail", "marie@example.org").await?;
    assert_eq!(ids, vec![TestEnv::id("f7fbf8c8")]);

    Ok(())
}

/// Tests that the default mail index folds case.
#[tokio::test]
async fn test_mail_lookup_is_case_insensitive() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let ids = env.indexes.lookup("account", "Mail", "Marie@Example.ORG").await?;
    assert_eq!(ids, vec![TestEnv::id("f7fbf8c8")]);

    Ok(())
}

/// Tests lookups on login names and numeric ids.
#[tokio::test]
async fn test_login_name_and_uid_lookup() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let by_name = env
        .indexes
        .lookup("account", "OnPremisesSamAccountName", "richard")
        .await?;
    assert_eq!(by_name, vec![TestEnv::id("932b4540")]);

    let by_uid = env.indexes.lookup("account", "UidNumber", "20003").await?;
    assert_eq!(by_uid, vec![TestEnv::id("058bff95")]);

    Ok(())
}

/// Tests that an unknown value is reported as not found.
#[tokio::test]
async fn test_unknown_mail_is_not_found() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let err = env
        .indexes
        .lookup("account", "Mail", "nobody@example.org")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let core: idm_core::Error = err.into();
    assert_eq!(core.kind(), idm_core::ErrorKind::NotFound);

    Ok(())
}

/// Tests that two records sharing a mail address are an error, not a pick.
#[tokio::test]
async fn test_duplicate_mail_is_ambiguous() -> anyhow::Result<()> {
    let mut users = crate::common::default_users();
    let mut twin = user("b1f74ec4", "marie2", "Marie Twin", 20010);
    twin.mail = "marie@example.org".to_string();
    users.push(twin);
    let env = TestEnv::with_users(users).await?;

    let err = env
        .indexes
        .lookup("account", "Mail", "marie@example.org")
        .await
        .unwrap_err();
    assert!(matches!(err, IndexError::Ambiguous { count: 2, .. }));

    Ok(())
}

/// Tests that search never misses what lookup finds.
#[tokio::test]
async fn test_search_contains_lookup_results() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let cases = [
        ("Mail", "einstein@example.org"),
        ("Mail", "EINSTEIN@example.org"),
        ("PreferredName", "moss"),
        ("UidNumber", "20001"),
        ("DisplayName", "Richard Feynman"),
        ("Id", "932b4540@https://idp.example.org"),
    ];

    for (field, value) in cases {
        let found = env.indexes.lookup("account", field, value).await?;
        let searched = env.indexes.search("account", field, value).await?;
        assert!(!found.is_empty(), "{field}={value}");
        for id in &found {
            assert!(searched.contains(id), "{field}={value}: {id} missing");
        }
    }

    Ok(())
}

/// Tests that search over-includes on partial values.
#[tokio::test]
async fn test_partial_search() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let ids = env.indexes.search("account", "Mail", "example.org").await?;
    assert_eq!(ids.len(), 4);

    let ids = env.indexes.search("account", "UidNumber", "2000").await?;
    assert_eq!(ids.len(), 4);

    Ok(())
}

/// Tests that no index on this backend accepts mutations.
#[tokio::test]
async fn test_mutations_are_unsupported() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    assert!(!env.indexes.is_empty());

    for index in env.indexes.iter() {
        let id = TestEnv::id("4c510ada");
        assert!(index.add(&id, "v").await.unwrap_err().is_unsupported());
        assert!(index.remove(&id, "v").await.unwrap_err().is_unsupported());
        assert!(index.update(&id, "a", "b").await.unwrap_err().is_unsupported());
        assert!(index.delete().await.unwrap_err().is_unsupported());
        assert_ne!(index.kind(), IndexKind::Autoincrement);
    }

    Ok(())
}

/// Tests that every outgoing call carries its own token.
#[tokio::test]
async fn test_each_query_authenticates() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let before = env.directory.call_count();

    // The default mail index is case-insensitive: claim query plus filter.
    env.indexes.lookup("account", "Mail", "moss@example.org").await?;
    env.indexes.search("account", "DisplayName", "Moss").await?;

    assert_eq!(env.directory.call_count(), before + 3);

    Ok(())
}
