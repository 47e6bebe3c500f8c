//! Resolving identifiers through an index and loading the records.

use idm_model::{Account, Group};
use idm_storage::{Repository, StorageError};

use crate::common::{default_users, user, TestEnv};

/// Tests the lookup-then-load flow.
#[tokio::test]
async fn test_lookup_then_load_account() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let ids = env
        .indexes
        .lookup("account", "PreferredName", "einstein")
        .await?;
    let account = env.repository.load_account(&ids[0]).await?;

    assert_eq!(account.id.to_string(), TestEnv::id("4c510ada"));
    assert_eq!(account.display_name, "Albert Einstein");
    assert_eq!(account.on_premises_sam_account_name, "einstein");
    assert_eq!(account.mail, "einstein@example.org");
    assert_eq!((account.uid_number, account.gid_number), (20000, 30000));

    Ok(())
}

/// Tests that a bulk load drops records it cannot normalize.
#[tokio::test]
async fn test_load_accounts_skips_malformed_record() -> anyhow::Result<()> {
    let mut users = default_users();
    users.push(user("deadbeef", "broken", "Broken Record", 0).with_opaque(
        "uid",
        idm_directory::OpaqueEntry::plain("twenty thousand"),
    ));
    let env = TestEnv::with_users(users).await?;

    let accounts = env.repository.load_accounts().await?;
    assert_eq!(accounts.len(), default_users().len());
    assert!(accounts.iter().all(|a| a.preferred_name != "broken"));

    Ok(())
}

/// Tests that loading an unknown identifier reports not found.
#[tokio::test]
async fn test_load_unknown_account() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let err = env
        .repository
        .load_account(&TestEnv::id("00000000"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { kind: "account", .. }));

    Ok(())
}

/// Tests that the repository refuses writes and group operations.
#[tokio::test]
async fn test_repository_is_read_only() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let mut account = Account::default();
    let err = env.repository.write_account(&mut account).await.unwrap_err();
    let core: idm_core::Error = err.into();
    assert!(core.is_unsupported());

    let mut group = Group::default();
    assert!(env.repository.write_group(&mut group).await.unwrap_err().is_unsupported());
    assert!(env.repository.load_groups().await.unwrap_err().is_unsupported());
    assert!(env
        .repository
        .delete_account(&TestEnv::id("4c510ada"))
        .await
        .unwrap_err()
        .is_unsupported());

    Ok(())
}
