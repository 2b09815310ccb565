// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The backing-store contract.
//!
//! A [`BackingStore`] holds the value entries of one tier, partitioned by
//! [`Category`](crate::Category) and keyed by property name. The settings
//! service never touches a backing location directly; everything goes through
//! this trait.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::category::CategorySet;
use crate::registry::{Declaration, PropertyRegistry};
use crate::value::{Value, ValueKind};

/// Errors reported by backing stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A name was defined again with a different declaration.
    #[error("property `{name}` is already defined with a different declaration")]
    Conflict {
        /// The property name.
        name: String,
    },

    /// A value was written to a name that was never defined.
    #[error("property `{0}` is not defined in this store")]
    Undeclared(String),

    /// A value does not match the declared semantic type.
    #[error("property `{name}` expects {expected}, found {found}")]
    TypeMismatch {
        /// The property name.
        name: String,
        /// The declared kind.
        expected: ValueKind,
        /// The kind that was supplied.
        found: ValueKind,
    },

    /// Reading or writing the backing location failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The backing location holds data the store cannot interpret.
    #[error("malformed {}: {reason}", path.display())]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

/// Storage for one tier of settings.
///
/// Implementations must uphold the following:
///
/// - [`define`](Self::define) is idempotent for an identical declaration and
///   fails with [`StoreError::Conflict`] for a different one.
/// - [`load`](Self::load) is all or nothing: on error the entries and the
///   unsaved set are exactly as they were before the call.
/// - [`has`](Self::has) is `true` exactly for names that hold an entry.
/// - [`set`](Self::set) type-checks against the definition.
/// - [`unsaved_categories`](Self::unsaved_categories) reports categories with
///   changes not yet written by [`save`](Self::save).
pub trait BackingStore {
    /// Declares a property in this store, creating its entry with the
    /// declared default if absent.
    fn define(&mut self, declaration: &Declaration) -> Result<(), StoreError>;

    /// Populates entries from the backing location.
    ///
    /// Every persisted entry is checked against its declaration in
    /// `registry`. Names the registry does not know are dropped; a value of
    /// the wrong kind fails the whole load.
    fn load(&mut self, registry: &PropertyRegistry) -> Result<(), StoreError>;

    /// Persists every entry to the backing location.
    fn save(&mut self) -> Result<(), StoreError>;

    /// Returns `true` if `name` holds an entry.
    fn has(&self, name: &str) -> bool;

    /// Returns the value stored under `name`.
    fn get(&self, name: &str) -> Option<&Value>;

    /// Overwrites the value of a defined property.
    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError>;

    /// Removes the entry for `name`, returning whether one existed.
    fn undefine(&mut self, name: &str) -> bool;

    /// Returns the categories holding unsaved changes.
    fn unsaved_categories(&self) -> CategorySet;

    /// Returns the names of every entry, sorted.
    fn names(&self) -> Vec<String>;
}

impl<S: BackingStore + ?Sized> BackingStore for Box<S> {
    fn define(&mut self, declaration: &Declaration) -> Result<(), StoreError> {
        (**self).define(declaration)
    }

    fn load(&mut self, registry: &PropertyRegistry) -> Result<(), StoreError> {
        (**self).load(registry)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        (**self).save()
    }

    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }

    fn get(&self, name: &str) -> Option<&Value> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(name, value)
    }

    fn undefine(&mut self, name: &str) -> bool {
        (**self).undefine(name)
    }

    fn unsaved_categories(&self) -> CategorySet {
        (**self).unsaved_categories()
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_message_names_both_kinds() {
        let err = StoreError::TypeMismatch {
            name: String::from("VOLUME"),
            expected: ValueKind::Integer,
            found: ValueKind::Text,
        };
        assert_eq!(
            err.to_string(),
            "property `VOLUME` expects integer, found text"
        );
    }
}
