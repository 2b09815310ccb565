// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiered Settings: two-tier property resolution for application settings.
//!
//! Settings live in two tiers:
//!
//! - **Global** - persistent values shared across sessions
//! - **Local** - per-run overrides of individual properties
//!
//! A property's effective value is its local value if one is set, and its
//! global value otherwise. Storage of each tier is delegated to a
//! [`BackingStore`]; this crate ships the in-memory [`MemoryStore`], and
//! `tiered_settings_fs` provides a directory-backed one.
//!
//! ## Core Concepts
//!
//! - [`PropertyRegistry`] - the fixed set of [`Declaration`]s (name,
//!   [`Category`], [`ValueKind`], default), handing out typed
//!   [`Property<T>`] keys.
//! - [`Settings`] - resolves, mutates and persists values across both tiers,
//!   and notifies [`ChangeListeners`].
//! - [`SharedSettings`] - a mutex-guarded handle for multi-threaded callers.
//!
//! ### Key Operations
//!
//! - `get(property)` - Local → Global
//! - `set(property, value, tier)` - write a tier and notify listeners
//! - `undefine(property)` - drop the local override
//! - `unsaved()` - `tier/category` pairs with pending changes
//! - `save()` - flush global, then local
//!
//! ## Quick Start
//!
//! ```rust
//! use tiered_settings::{Category, MemoryStore, PropertyRegistry, Settings, Tier};
//!
//! let mut registry = PropertyRegistry::new();
//! let volume = registry.register("VOLUME", Category::Settings, 80_i64).unwrap();
//!
//! let mut settings =
//!     Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
//!
//! settings.add_listener(|event| println!("{} is now {}", event.name, event.value));
//!
//! settings.set(volume, 30, Tier::Local).unwrap();
//! assert_eq!(settings.get(volume), 30);
//!
//! let unsaved: Vec<String> = settings.unsaved().iter().map(ToString::to_string).collect();
//! assert_eq!(unsaved, ["local/settings"]);
//! ```
//!
//! ## Undefine and notification
//!
//! Removing an override notifies listeners only when the effective value
//! actually changes, so observers never miss a visible change and never see a
//! spurious one.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Value`], [`ValueKind`],
//!   [`Category`] and [`Tier`].

mod category;
mod id;
mod listeners;
mod memory;
mod registry;
mod settings;
mod shared;
pub mod standard;
mod store;
mod table;
mod value;

pub use category::{Category, CategorySet, CategorySetIter};
pub use id::{Property, PropertyId};
pub use listeners::{ChangeEvent, ChangeListeners, ListenerId};
pub use memory::MemoryStore;
pub use registry::{Declaration, DeclarationError, PropertyRegistry};
pub use settings::{Settings, SettingsError, Tier, UnsavedCategory};
pub use shared::SharedSettings;
pub use store::{BackingStore, StoreError};
pub use table::EntryTable;
pub use value::{PropertyValue, Value, ValueKind};
