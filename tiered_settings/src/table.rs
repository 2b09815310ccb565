// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category-partitioned entry table with unsaved-change tracking.
//!
//! [`EntryTable`] is the in-memory half shared by every backing store in this
//! workspace. Stores add a backing location on top of it: they read every
//! entry first and hand them to [`EntryTable::load`] in one go, and call
//! [`EntryTable::mark_saved`] after writing.
//!
//! # Unsaved tracking
//!
//! A category becomes unsaved when an entry in it is created, changes value,
//! or is removed. Saving clears the unsaved set. Loading clears it too, except
//! for categories whose persisted form the load had to correct (an unknown
//! name dropped, or an entry found under the wrong category).

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::category::{Category, CategorySet};
use crate::registry::{Declaration, PropertyRegistry};
use crate::store::StoreError;
use crate::value::{Value, ValueKind};

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    category: Category,
    kind: ValueKind,
    default: Value,
    value: Value,
}

impl Entry {
    fn new(declaration: &Declaration, value: Value) -> Self {
        Self {
            category: declaration.category(),
            kind: declaration.kind(),
            default: declaration.default_value().clone(),
            value,
        }
    }

    fn matches(&self, declaration: &Declaration) -> bool {
        self.category == declaration.category()
            && self.kind == declaration.kind()
            && self.default.same_as(declaration.default_value())
    }
}

/// Entries of one tier, keyed by property name.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{Category, CategorySet, Declaration, EntryTable, Value};
///
/// let mut table = EntryTable::new();
/// let volume = Declaration::new("VOLUME", Category::Settings, Value::Integer(80));
///
/// table.define(&volume).unwrap();
/// table.define(&volume).unwrap(); // idempotent
/// table.set("VOLUME", Value::Integer(30)).unwrap();
///
/// assert_eq!(table.get("VOLUME"), Some(&Value::Integer(30)));
/// assert_eq!(table.unsaved(), CategorySet::from(Category::Settings));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EntryTable {
    entries: HashMap<String, Entry>,
    unsaved: CategorySet,
}

impl EntryTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declares a property, creating its entry with the default value if
    /// absent.
    ///
    /// Defining the same declaration again is a no-op; a different
    /// declaration under the same name is a [`StoreError::Conflict`].
    pub fn define(&mut self, declaration: &Declaration) -> Result<(), StoreError> {
        let name = declaration.name();
        match self.entries.get(name) {
            Some(entry) if entry.matches(declaration) => Ok(()),
            Some(_) => Err(StoreError::Conflict {
                name: name.to_owned(),
            }),
            None => {
                self.entries.insert(
                    name.to_owned(),
                    Entry::new(declaration, declaration.default_value().clone()),
                );
                self.unsaved.insert(declaration.category());
                debug!(property = name, category = %declaration.category(), "defined");
                Ok(())
            }
        }
    }

    /// Returns `true` if `name` holds an entry.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Returns the category of the entry stored under `name`.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<Category> {
        self.entries.get(name).map(|e| e.category)
    }

    /// Overwrites the value of a defined entry.
    ///
    /// The category is only marked unsaved if the value actually changes.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| StoreError::Undeclared(name.to_owned()))?;
        if value.kind() != entry.kind {
            return Err(StoreError::TypeMismatch {
                name: name.to_owned(),
                expected: entry.kind,
                found: value.kind(),
            });
        }
        if !entry.value.same_as(&value) {
            entry.value = value;
            self.unsaved.insert(entry.category);
        }
        Ok(())
    }

    /// Removes the entry for `name`, returning whether one existed.
    pub fn undefine(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(entry) => {
                self.unsaved.insert(entry.category);
                true
            }
            None => false,
        }
    }

    /// Applies entries read from a backing location, all or nothing.
    ///
    /// Each entry is checked against its declaration in `registry`: its value
    /// must convert to the declared kind (integers widen to floats), and an
    /// entry the table already holds must carry the same declaration. A name
    /// the registry does not know is dropped. Loaded values overwrite existing
    /// ones; entries the location does not mention are kept.
    ///
    /// On error the table is left exactly as it was.
    pub fn load<I>(&mut self, registry: &PropertyRegistry, entries: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = (Category, String, Value)>,
    {
        let mut staged = self.entries.clone();
        let mut corrected = CategorySet::EMPTY;
        for (category, name, value) in entries {
            let Some(declaration) = registry.declaration_by_name(&name) else {
                warn!(property = name.as_str(), %category, "dropping unknown setting");
                corrected.insert(category);
                continue;
            };
            let value = value
                .coerce(declaration.kind())
                .ok_or_else(|| StoreError::TypeMismatch {
                    name: name.clone(),
                    expected: declaration.kind(),
                    found: value.kind(),
                })?;
            if declaration.category() != category {
                warn!(
                    property = name.as_str(),
                    found = %category,
                    declared = %declaration.category(),
                    "entry persisted under the wrong category"
                );
                corrected.insert(category);
                corrected.insert(declaration.category());
            }
            match staged.get_mut(name.as_str()) {
                Some(entry) if entry.matches(declaration) => entry.value = value,
                Some(_) => return Err(StoreError::Conflict { name }),
                None => {
                    staged.insert(name, Entry::new(declaration, value));
                }
            }
        }
        self.entries = staged;
        self.unsaved = corrected;
        Ok(())
    }

    /// Returns the categories with unsaved changes.
    #[must_use]
    pub fn unsaved(&self) -> CategorySet {
        self.unsaved
    }

    /// Forgets every pending change, after a load or save.
    pub fn mark_saved(&mut self) {
        self.unsaved.clear();
    }

    /// Returns the names of every entry, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns the entries of `category` sorted by name.
    #[must_use]
    pub fn category_entries(&self, category: Category) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, e)| e.category == category)
            .map(|(name, e)| (name.as_str(), &e.value))
            .collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }
}
