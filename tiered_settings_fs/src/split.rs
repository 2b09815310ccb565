// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-file-per-category directory store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tiered_settings::{
    BackingStore, Category, CategorySet, Declaration, EntryTable, PropertyRegistry, StoreError,
    Value,
};
use tracing::{debug, info};

/// File extension of category files.
pub const EXTENSION: &str = "toml";

/// A [`BackingStore`] persisting each [`Category`] to `<dir>/<category>.toml`.
///
/// Each file is a flat TOML table of `NAME = value` pairs. A missing
/// directory or file loads as empty. Saving rewrites every category that
/// holds entries and deletes the file of a category left without any, so a
/// removed local override does not come back on the next load.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{BackingStore, Category, Declaration, Value};
/// use tiered_settings_fs::SplitStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = SplitStore::new(dir.path());
/// store
///     .define(&Declaration::new("VOLUME", Category::Settings, Value::Integer(80)))
///     .unwrap();
/// store.set("VOLUME", Value::Integer(30)).unwrap();
/// store.save().unwrap();
///
/// let text = std::fs::read_to_string(dir.path().join("settings.toml")).unwrap();
/// assert_eq!(text.trim(), "VOLUME = 30");
/// ```
#[derive(Clone, Debug)]
pub struct SplitStore {
    dir: PathBuf,
    table: EntryTable,
}

impl SplitStore {
    /// Creates an empty store bound to `dir`. Nothing is read until
    /// [`load`](BackingStore::load).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            table: EntryTable::new(),
        }
    }

    /// Returns the directory this store reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file holding `category`.
    #[must_use]
    pub fn file_path(&self, category: Category) -> PathBuf {
        self.dir.join(format!("{category}.{EXTENSION}"))
    }

    fn read_category(&self, category: Category) -> Result<BTreeMap<String, Value>, StoreError> {
        let path = self.file_path(category);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let entries: BTreeMap<String, Value> =
            toml::from_str(&text).map_err(|err| StoreError::Malformed {
                path: path.clone(),
                reason: err.to_string(),
            })?;
        debug!(path = %path.display(), entries = entries.len(), "read category file");
        Ok(entries)
    }

    fn save_category(&self, category: Category) -> Result<(), StoreError> {
        let path = self.file_path(category);
        let entries: BTreeMap<&str, &Value> =
            self.table.category_entries(category).into_iter().collect();
        if entries.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "removed empty category file");
                    Ok(())
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StoreError::Io { path, source }),
            };
        }

        let text = toml::to_string(&entries).map_err(|err| StoreError::Malformed {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        // Write next to the target and rename, so a crash never leaves a
        // truncated file behind.
        let staging = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&staging, text).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io { path, source })
    }
}

impl BackingStore for SplitStore {
    fn define(&mut self, declaration: &Declaration) -> Result<(), StoreError> {
        self.table.define(declaration)
    }

    fn load(&mut self, registry: &PropertyRegistry) -> Result<(), StoreError> {
        // Every file is read before any entry is applied, so a bad file
        // leaves the table untouched.
        let mut entries = Vec::new();
        for category in Category::ALL {
            entries.extend(
                self.read_category(category)?
                    .into_iter()
                    .map(|(name, value)| (category, name, value)),
            );
        }
        self.table.load(registry, entries)?;
        info!(dir = %self.dir.display(), "settings loaded");
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        for category in Category::ALL {
            self.save_category(category)?;
        }
        self.table.mark_saved();
        info!(dir = %self.dir.display(), "settings saved");
        Ok(())
    }

    fn has(&self, name: &str) -> bool {
        self.table.has(name)
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.table.get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        self.table.set(name, value)
    }

    fn undefine(&mut self, name: &str) -> bool {
        self.table.undefine(name)
    }

    fn unsaved_categories(&self) -> CategorySet {
        self.table.unsaved()
    }

    fn names(&self) -> Vec<String> {
        self.table.names()
    }
}
