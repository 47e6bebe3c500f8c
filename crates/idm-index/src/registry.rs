//! Registry of index constructors.
//!
//! Constructors are registered on an [`IndexRegistryBuilder`] during
//! startup and frozen into an immutable [`IndexRegistry`], which the
//! composition root owns and passes to whoever builds indexes.

use std::collections::HashMap;

use crate::error::{IndexResult, RegistryError};
use crate::index::Index;
use crate::options::IndexOptions;

/// Builds an uninitialized index.
pub type IndexConstructor = fn(IndexOptions) -> IndexResult<Box<dyn Index>>;

type Key = (String, String);

/// Collects constructors keyed by (backend, kind).
#[derive(Debug, Default)]
pub struct IndexRegistryBuilder {
    constructors: HashMap<Key, IndexConstructor>,
}

impl IndexRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor.
    ///
    /// ## Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the key is already taken.
    pub fn register(
        &mut self,
        backend: &str,
        kind: &str,
        constructor: IndexConstructor,
    ) -> Result<(), RegistryError> {
        let key = (backend.to_string(), kind.to_string());
        if self.constructors.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                backend: key.0,
                kind: key.1,
            });
        }
        self.constructors.insert(key, constructor);
        Ok(())
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> IndexRegistry {
        IndexRegistry {
            constructors: self.constructors,
        }
    }
}

/// Immutable table of index constructors.
#[derive(Debug, Default)]
pub struct IndexRegistry {
    constructors: HashMap<Key, IndexConstructor>,
}

impl IndexRegistry {
    /// Builds an uninitialized index of `kind` for `backend`.
    ///
    /// ## Errors
    ///
    /// Returns [`RegistryError::UnknownIndex`] for an unregistered key, or
    /// whatever the constructor rejects.
    pub fn create(
        &self,
        backend: &str,
        kind: &str,
        options: IndexOptions,
    ) -> IndexResult<Box<dyn Index>> {
        let constructor = self
            .constructors
            .get(&(backend.to_string(), kind.to_string()))
            .ok_or_else(|| RegistryError::UnknownIndex {
                backend: backend.to_string(),
                kind: kind.to_string(),
            })?;
        constructor(options)
    }

    /// Checks if a constructor is registered.
    #[must_use]
    pub fn contains(&self, backend: &str, kind: &str) -> bool {
        self.constructors
            .contains_key(&(backend.to_string(), kind.to_string()))
    }

    /// Lists the registered kinds for a backend.
    #[must_use]
    pub fn kinds(&self, backend: &str) -> Vec<&str> {
        let mut kinds: Vec<&str> = self
            .constructors
            .keys()
            .filter(|(b, _)| b == backend)
            .map(|(_, k)| k.as_str())
            .collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns the number of registered constructors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
