// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory backing store.

use crate::category::{Category, CategorySet};
use crate::registry::{Declaration, PropertyRegistry};
use crate::store::{BackingStore, StoreError};
use crate::table::EntryTable;
use crate::value::Value;

/// A [`BackingStore`] whose backing location is a snapshot in memory.
///
/// [`save`](BackingStore::save) copies the working entries into the snapshot
/// and [`load`](BackingStore::load) overlays the snapshot onto the working
/// entries. Useful for tests and for embedders that persist settings
/// themselves.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{BackingStore, Category, MemoryStore, PropertyRegistry, Value};
///
/// let mut registry = PropertyRegistry::new();
/// registry.register("VOLUME", Category::Settings, 80_i64).unwrap();
///
/// let mut store = MemoryStore::new()
///     .with_persisted(Category::Settings, "VOLUME", Value::Integer(30));
/// assert!(!store.has("VOLUME"));
///
/// store.load(&registry).unwrap();
/// assert_eq!(store.get("VOLUME"), Some(&Value::Integer(30)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    working: EntryTable,
    persisted: Vec<(Category, String, Value)>,
    fail_next_load: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store with an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry to the persisted snapshot.
    #[must_use]
    pub fn with_persisted(
        mut self,
        category: Category,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        self.persisted.push((category, name.into(), value));
        self
    }

    /// Makes the next [`load`](BackingStore::load) fail with
    /// [`StoreError::Malformed`] carrying `reason`.
    #[must_use]
    pub fn failing_load(mut self, reason: impl Into<String>) -> Self {
        self.fail_next_load = Some(reason.into());
        self
    }

    /// Returns the persisted value of `name`, if the snapshot holds one.
    #[must_use]
    pub fn persisted(&self, name: &str) -> Option<&Value> {
        self.persisted
            .iter()
            .find(|(_, n, _)| n == name)
            .map(|(_, _, v)| v)
    }
}

impl BackingStore for MemoryStore {
    fn define(&mut self, declaration: &Declaration) -> Result<(), StoreError> {
        self.working.define(declaration)
    }

    fn load(&mut self, registry: &PropertyRegistry) -> Result<(), StoreError> {
        if let Some(reason) = self.fail_next_load.take() {
            return Err(StoreError::Malformed {
                path: "<memory>".into(),
                reason,
            });
        }
        self.working.load(registry, self.persisted.iter().cloned())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.persisted = Category::ALL
            .into_iter()
            .flat_map(|category| {
                self.working
                    .category_entries(category)
                    .into_iter()
                    .map(move |(name, value)| (category, name.to_owned(), value.clone()))
            })
            .collect();
        self.working.mark_saved();
        Ok(())
    }

    fn has(&self, name: &str) -> bool {
        self.working.has(name)
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.working.get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        self.working.set(name, value)
    }

    fn undefine(&mut self, name: &str) -> bool {
        self.working.undefine(name)
    }

    fn unsaved_categories(&self) -> CategorySet {
        self.working.unsaved()
    }

    fn names(&self) -> Vec<String> {
        self.working.names()
    }
}
