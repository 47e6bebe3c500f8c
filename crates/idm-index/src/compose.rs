//! Building and routing the configured indexes.

use std::sync::Arc;

use idm_core::Config;
use idm_directory::DirectoryConnector;

use crate::error::{IndexError, IndexResult};
use crate::field::RecordKind;
use crate::index::Index;
use crate::options::IndexOptions;
use crate::registry::IndexRegistry;

/// The initialized indexes of a process, addressed by (type name, field).
#[derive(Debug, Default)]
pub struct IndexSet {
    indexes: Vec<Box<dyn Index>>,
}

impl IndexSet {
    /// Builds and initializes every index listed in `config.indexes`.
    ///
    /// ## Errors
    ///
    /// Fails on the first index that cannot be constructed or initialized.
    pub async fn from_config(
        registry: &IndexRegistry,
        config: &Config,
        connector: Arc<dyn DirectoryConnector>,
    ) -> IndexResult<Self> {
        let mut set = Self::default();
        for index_config in &config.indexes {
            let options = IndexOptions::from_config(config, index_config, Arc::clone(&connector));
            let index = registry.create(&index_config.backend, &index_config.kind, options)?;
            set.insert(index).await?;
        }

        tracing::info!(count = set.len(), "Indexes initialized");
        Ok(set)
    }

    /// Initializes `index` and adds it to the set.
    ///
    /// ## Errors
    ///
    /// Returns the error raised by `init`.
    pub async fn insert(&mut self, mut index: Box<dyn Index>) -> IndexResult<()> {
        index.init().await?;
        tracing::debug!(
            backend = index.backend(),
            kind = %index.kind(),
            field = %index.index_by(),
            "Index ready"
        );
        self.indexes.push(index);
        Ok(())
    }

    /// Returns the first index covering `field` of `type_name`.
    #[must_use]
    pub fn get(&self, type_name: &str, field: &str) -> Option<&dyn Index> {
        let record_kind = RecordKind::from_type_name(type_name)?;
        let index = self.indexes.iter().find(|idx| {
            idx.index_by().record_kind() == record_kind && idx.index_by().name() == field
        })?;
        Some(&**index)
    }

    /// Exact lookup through the index covering `field`.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if no index covers the field, otherwise
    /// whatever the index returns.
    pub async fn lookup(&self, type_name: &str, field: &str, value: &str) -> IndexResult<Vec<String>> {
        self.route(type_name, field)?.lookup(value).await
    }

    /// Substring search through the index covering `field`.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if no index covers the field, otherwise
    /// whatever the index returns.
    pub async fn search(&self, type_name: &str, field: &str, pattern: &str) -> IndexResult<Vec<String>> {
        self.route(type_name, field)?.search(pattern).await
    }

    /// Returns the number of indexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if the set holds no index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Iterates over the indexes.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Index + 'static)> {
        self.indexes.iter().map(|idx| &**idx)
    }

    fn route(&self, type_name: &str, field: &str) -> IndexResult<&dyn Index> {
        self.get(type_name, field)
            .ok_or_else(|| IndexError::config(format!("no index for {type_name}.{field}")))
    }
}
