// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directory-backed storage for `tiered_settings`.
//!
//! [`SplitStore`] keeps one TOML file per [`Category`](tiered_settings::Category)
//! in a directory. [`Locations`] picks the directories of both tiers, and
//! [`open`] wires everything into a ready [`FileSettings`] service.
//!
//! ```rust
//! use tiered_settings::{Category, PropertyRegistry, Tier};
//! use tiered_settings_fs::{Locations, open};
//!
//! let root = tempfile::tempdir().unwrap();
//! let mut registry = PropertyRegistry::new();
//! let volume = registry.register("VOLUME", Category::Settings, 80_i64).unwrap();
//!
//! let mut settings = open(registry, &Locations::in_dir(root.path())).unwrap();
//! settings.set(volume, 30, Tier::Global).unwrap();
//! settings.save().unwrap();
//!
//! assert!(root.path().join("settings.toml").exists());
//! ```

mod locations;
mod split;

pub use locations::{InvalidRunName, Locations, RUNS_DIR};
pub use split::{EXTENSION, SplitStore};

use tiered_settings::{PropertyRegistry, Settings, SettingsError};

/// Settings whose tiers are both directory-backed.
pub type FileSettings = Settings<SplitStore, SplitStore>;

/// Initializes settings stored under `locations`.
///
/// The global tier is loaded; the local tier is not (call
/// [`Settings::load_local`] once a run begins).
pub fn open(
    registry: PropertyRegistry,
    locations: &Locations,
) -> Result<FileSettings, SettingsError> {
    let (global, local) = locations.stores();
    Settings::initialize(registry, global, local)
}
