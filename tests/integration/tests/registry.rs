//! Registry and index construction.

use std::sync::Arc;

use idm_core::config::{Bound, IndexConfig};
use idm_index::{register_directory_indexes, IndexError, IndexKind, IndexOptions, IndexSet, RegistryError};

use crate::common::{config, connector, registry, TestEnv};

/// Tests that registering the same variants twice fails.
#[tokio::test]
async fn test_duplicate_registration() -> anyhow::Result<()> {
    let mut builder = idm_index::IndexRegistryBuilder::new();
    register_directory_indexes(&mut builder)?;

    let err = register_directory_indexes(&mut builder).unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { .. }));

    Ok(())
}

/// Tests that an autoincrement index on a text field fails at construction.
#[tokio::test]
async fn test_autoincrement_on_text_field_fails() -> anyhow::Result<()> {
    let registry = registry()?;

    let err = registry
        .create("directory", "autoincrement", IndexOptions::new("account", "Mail"))
        .unwrap_err();
    assert!(matches!(err, IndexError::Configuration(_)));

    Ok(())
}

/// Tests that a numeric autoincrement index joins a set and stays inert.
#[tokio::test]
async fn test_autoincrement_on_numeric_field() -> anyhow::Result<()> {
    let registry = registry()?;
    let index = registry.create(
        "directory",
        "autoincrement",
        IndexOptions::new("account", "UidNumber").with_bound(Bound::new(20000, 29999)),
    )?;

    let mut set = IndexSet::default();
    set.insert(index).await?;

    let index = set.get("account", "UidNumber").expect("index registered");
    assert_eq!(index.kind(), IndexKind::Autoincrement);
    assert!(set
        .lookup("account", "UidNumber", "20000")
        .await
        .unwrap_err()
        .is_unsupported());

    Ok(())
}

/// Tests that configuration naming an unregistered variant is rejected.
#[tokio::test]
async fn test_unknown_variant_in_config() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut config = config();
    config.indexes = vec![IndexConfig::directory("btree", "account", "Mail")];

    let err = IndexSet::from_config(&registry()?, &config, connector(&env.directory))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IndexError::Registry(RegistryError::UnknownIndex { .. })
    ));

    Ok(())
}

/// Tests that an index without a connector cannot be built.
#[tokio::test]
async fn test_unique_index_requires_connector() -> anyhow::Result<()> {
    let registry = registry()?;
    let options = IndexOptions::new("account", "Mail").with_jwt_secret(crate::common::SECRET);

    let err = registry.create("directory", "unique", options).unwrap_err();
    assert!(matches!(err, IndexError::Configuration(_)));

    let env = TestEnv::new().await?;
    let options = IndexOptions::new("account", "Mail")
        .with_jwt_secret(crate::common::SECRET)
        .with_connector(Arc::new(idm_directory::StaticConnector::new(env.directory.clone())));
    assert!(registry.create("directory", "unique", options).is_ok());

    Ok(())
}
