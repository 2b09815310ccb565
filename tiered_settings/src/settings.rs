// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The settings service: resolution, mutation, overrides, and persistence
//! across the global and local tiers.

use core::fmt;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::category::Category;
use crate::id::{Property, PropertyId};
use crate::listeners::{ChangeEvent, ChangeListeners, ListenerId};
use crate::registry::{Declaration, PropertyRegistry};
use crate::store::{BackingStore, StoreError};
use crate::value::{PropertyValue, Value};

/// One of the two value tiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tier {
    /// Persistent, cross-session values.
    Global,
    /// Per-run overrides.
    Local,
}

impl Tier {
    /// Returns the lower-case label of this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category with pending changes in one tier.
///
/// Displays as `tier/category`, e.g. `global/settings`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsavedCategory {
    /// The tier holding the changes.
    pub tier: Tier,
    /// The category holding the changes.
    pub category: Category,
}

impl fmt::Display for UnsavedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tier, self.category)
    }
}

/// Errors raised by the settings service.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A backing store rejected an operation.
    #[error("{tier} settings store failed: {source}")]
    Store {
        /// The tier whose store failed.
        tier: Tier,
        /// What the store reported.
        #[source]
        source: StoreError,
    },
}

impl SettingsError {
    fn store(tier: Tier) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { tier, source }
    }
}

/// Two-tier settings over a fixed [`PropertyRegistry`].
///
/// The effective value of a property is its local value if the local tier
/// holds an entry for it, and its global value otherwise. The global tier
/// holds an entry for every declared property from
/// [`initialize`](Self::initialize) on; the local tier starts empty and every
/// entry in it is an override.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{Category, MemoryStore, PropertyRegistry, Settings, Tier};
///
/// let mut registry = PropertyRegistry::new();
/// let p = registry.register("P", Category::Settings, 10_i64).unwrap();
///
/// let mut settings =
///     Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
/// assert_eq!(settings.get(p), 10);
///
/// settings.set(p, 42, Tier::Global).unwrap();
/// assert_eq!(settings.get(p), 42);
///
/// settings.set(p, 7, Tier::Local).unwrap();
/// assert_eq!(settings.get(p), 7);
///
/// settings.undefine(p);
/// assert_eq!(settings.get(p), 42);
/// ```
pub struct Settings<G, L> {
    registry: PropertyRegistry,
    global: G,
    local: L,
    listeners: ChangeListeners,
}

impl<G: BackingStore, L: BackingStore> Settings<G, L> {
    /// Declares every registered property in `global`, then loads it.
    ///
    /// `local` is kept as-is and not loaded; see
    /// [`load_local`](Self::load_local).
    ///
    /// Failure is logged once and returned; no service exists afterwards, so
    /// nothing can read half-initialized settings.
    pub fn initialize(
        registry: PropertyRegistry,
        global: G,
        local: L,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self {
            registry,
            global,
            local,
            listeners: ChangeListeners::new(),
        };
        match settings.initialize_global() {
            Ok(()) => {
                info!(properties = settings.registry.len(), "settings initialized");
                Ok(settings)
            }
            Err(err) => {
                error!(error = %err, "settings initialization failed");
                Err(err)
            }
        }
    }

    fn initialize_global(&mut self) -> Result<(), SettingsError> {
        for (_, declaration) in self.registry.iter() {
            self.global
                .define(declaration)
                .map_err(SettingsError::store(Tier::Global))?;
        }
        self.global
            .load(&self.registry)
            .map_err(SettingsError::store(Tier::Global))
    }

    /// Returns the registry the service was initialized with.
    #[must_use]
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Returns the global store.
    #[must_use]
    pub fn global(&self) -> &G {
        &self.global
    }

    /// Returns the local store.
    #[must_use]
    pub fn local(&self) -> &L {
        &self.local
    }

    fn declaration(&self, id: PropertyId) -> &Declaration {
        self.registry
            .declaration(id)
            .unwrap_or_else(|| panic!("property {id} is not declared in this registry"))
    }

    /// Returns the effective value of `property`.
    ///
    /// # Panics
    ///
    /// Panics if `property` was not issued by this service's registry, or was
    /// issued with a different value type.
    #[must_use]
    pub fn get<T: PropertyValue>(&self, property: Property<T>) -> T {
        let value = self.value(property.id());
        T::from_value(value).unwrap_or_else(|| {
            panic!(
                "property {} holds a {} value, not {}",
                self.declaration(property.id()).name(),
                value.kind(),
                T::KIND
            )
        })
    }

    /// Returns the effective value of the property `id`, untyped.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not declared in this service's registry.
    #[must_use]
    pub fn value(&self, id: PropertyId) -> &Value {
        let name = self.declaration(id).name();
        self.local
            .get(name)
            .or_else(|| self.global.get(name))
            .unwrap_or_else(|| panic!("global settings hold no entry for {name}"))
    }

    /// Returns the value `tier` holds for `property`, without falling back.
    ///
    /// # Panics
    ///
    /// Panics if `property` was not issued by this service's registry.
    #[must_use]
    pub fn tier_value<T: PropertyValue>(&self, property: Property<T>, tier: Tier) -> Option<T> {
        let name = self.declaration(property.id()).name();
        let value = match tier {
            Tier::Global => self.global.get(name),
            Tier::Local => self.local.get(name),
        };
        value.and_then(T::from_value)
    }

    /// Returns `true` if the local tier overrides `property`.
    ///
    /// # Panics
    ///
    /// Panics if `property` was not issued by this service's registry.
    #[must_use]
    pub fn is_overridden<T: PropertyValue>(&self, property: Property<T>) -> bool {
        self.local.has(self.declaration(property.id()).name())
    }

    /// Writes `value` into `tier` and notifies listeners.
    ///
    /// Writing to the local tier first defines the property there with the
    /// registry's declaration; repeated local writes reuse that definition.
    /// Listeners are called once, after the write, before this returns.
    ///
    /// # Panics
    ///
    /// Panics if `property` was not issued by this service's registry.
    pub fn set<T: PropertyValue>(
        &mut self,
        property: Property<T>,
        value: T,
        tier: Tier,
    ) -> Result<(), SettingsError> {
        self.set_value(property.id(), value.into_value(), tier)
    }

    /// Untyped form of [`set`](Self::set).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not declared in this service's registry.
    pub fn set_value(
        &mut self,
        id: PropertyId,
        value: Value,
        tier: Tier,
    ) -> Result<(), SettingsError> {
        let declaration = self
            .registry
            .declaration(id)
            .unwrap_or_else(|| panic!("property {id} is not declared in this registry"));
        let name = declaration.name();
        // Checked before the local define so a rejected write leaves no
        // override behind.
        let value = value
            .coerce(declaration.kind())
            .ok_or_else(|| StoreError::TypeMismatch {
                name: name.to_owned(),
                expected: declaration.kind(),
                found: value.kind(),
            })
            .map_err(SettingsError::store(tier))?;
        match tier {
            Tier::Global => self
                .global
                .set(name, value)
                .map_err(SettingsError::store(tier))?,
            Tier::Local => {
                self.local
                    .define(declaration)
                    .map_err(SettingsError::store(tier))?;
                self.local
                    .set(name, value)
                    .map_err(SettingsError::store(tier))?;
            }
        }
        debug!(property = name, %tier, "set");
        self.notify(id, tier);
        Ok(())
    }

    /// Removes the local override of `property`, so that it resolves to its
    /// global value again. The global tier is never touched.
    ///
    /// Returns `true` if an override was removed; undefining a property
    /// without one is a no-op. Listeners are notified only if the effective
    /// value changed.
    ///
    /// # Panics
    ///
    /// Panics if `property` was not issued by this service's registry.
    pub fn undefine<T: PropertyValue>(&mut self, property: Property<T>) -> bool {
        self.undefine_id(property.id())
    }

    /// Untyped form of [`undefine`](Self::undefine).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not declared in this service's registry.
    pub fn undefine_id(&mut self, id: PropertyId) -> bool {
        let name = self.declaration(id).name();
        let Some(previous) = self.local.get(name).cloned() else {
            return false;
        };
        self.local.undefine(name);
        debug!(property = name, "local override removed");
        if !self.value(id).same_as(&previous) {
            self.notify(id, Tier::Local);
        }
        true
    }

    /// Loads the local tier from its backing location.
    ///
    /// Loaded entries are checked against the registry: known properties are
    /// defined with their declaration, unknown names are dropped. Listeners
    /// are notified for every property whose effective value changed.
    ///
    /// Loading is all or nothing. On error the local tier is exactly as it
    /// was and no listener is called.
    pub fn load_local(&mut self) -> Result<(), SettingsError> {
        let before: Vec<Value> = self
            .registry
            .iter()
            .map(|(id, _)| self.value(id).clone())
            .collect();

        self.local
            .load(&self.registry)
            .map_err(SettingsError::store(Tier::Local))?;

        let changed: Vec<PropertyId> = self
            .registry
            .iter()
            .zip(&before)
            .filter(|((id, _), old)| !self.value(*id).same_as(old))
            .map(|((id, _), _)| id)
            .collect();
        info!(overrides = self.local.names().len(), "local settings loaded");
        for id in changed {
            self.notify(id, Tier::Local);
        }
        Ok(())
    }

    /// Registers a change listener.
    ///
    /// Listeners run synchronously, in registration order, after every
    /// successful [`set`](Self::set) and after any
    /// [`undefine`](Self::undefine) or [`load_local`](Self::load_local) that
    /// changes an effective value.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ChangeEvent<'_>) + Send + 'static,
    {
        self.listeners.add(listener)
    }

    /// Removes a change listener. Unknown handles are ignored.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn notify(&mut self, id: PropertyId, tier: Tier) {
        let Some(declaration) = self.registry.declaration(id) else {
            return;
        };
        let name = declaration.name();
        let Some(value) = self.local.get(name).or_else(|| self.global.get(name)) else {
            return;
        };
        self.listeners.notify(&ChangeEvent {
            id,
            name,
            tier,
            value,
        });
    }

    /// Returns the categories with unsaved changes: global ones first, then
    /// local ones, each in the order its store reports them.
    #[must_use]
    pub fn unsaved(&self) -> Vec<UnsavedCategory> {
        let global = self.global.unsaved_categories().into_iter().map(|category| {
            UnsavedCategory {
                tier: Tier::Global,
                category,
            }
        });
        let local = self.local.unsaved_categories().into_iter().map(|category| {
            UnsavedCategory {
                tier: Tier::Local,
                category,
            }
        });
        global.chain(local).collect()
    }

    /// Saves the global tier, then the local tier.
    ///
    /// Both saves are attempted; the first failure is returned.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        let global = self
            .global
            .save()
            .map_err(SettingsError::store(Tier::Global));
        let local = self
            .local
            .save()
            .map_err(SettingsError::store(Tier::Local));
        for err in [&global, &local].into_iter().filter_map(|r| r.as_ref().err()) {
            error!(error = %err, "saving settings failed");
        }
        if global.is_ok() && local.is_ok() {
            info!("settings saved");
        }
        global.and(local)
    }

    /// Consumes the service, returning its registry and stores.
    pub fn into_parts(self) -> (PropertyRegistry, G, L) {
        (self.registry, self.global, self.local)
    }
}

impl<G, L> fmt::Debug for Settings<G, L>
where
    G: fmt::Debug,
    L: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("registry", &self.registry)
            .field("global", &self.global)
            .field("local", &self.local)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<(&'static str, Tier, Value)>>>;

    struct Fixture {
        settings: Settings<MemoryStore, MemoryStore>,
        p: Property<i64>,
        accent: Property<String>,
    }

    fn fixture() -> Fixture {
        fixture_with(MemoryStore::new(), MemoryStore::new())
    }

    fn fixture_with(global: MemoryStore, local: MemoryStore) -> Fixture {
        let mut registry = PropertyRegistry::new();
        let p = registry.register("P", Category::Settings, 10_i64).unwrap();
        let accent = registry
            .register("ACCENT", Category::Theme, String::from("blue"))
            .unwrap();
        let settings = Settings::initialize(registry, global, local).unwrap();
        Fixture {
            settings,
            p,
            accent,
        }
    }

    fn record(settings: &mut Settings<MemoryStore, MemoryStore>) -> (Log, ListenerId) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        let id = settings.add_listener(move |e| {
            sink.lock().unwrap().push((e.name, e.tier, e.value.clone()));
        });
        (log, id)
    }

    fn labels(settings: &Settings<MemoryStore, MemoryStore>) -> Vec<String> {
        settings.unsaved().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn precedence_scenario() {
        let Fixture {
            mut settings, p, ..
        } = fixture();

        assert_eq!(settings.get(p), 10);
        settings.set(p, 42, Tier::Global).unwrap();
        assert_eq!(settings.get(p), 42);
        settings.set(p, 7, Tier::Local).unwrap();
        assert_eq!(settings.get(p), 7);
        assert!(settings.undefine(p));
        assert_eq!(settings.get(p), 42);
    }

    #[test]
    fn undefine_never_touches_global() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        settings.set(p, 5, Tier::Local).unwrap();
        settings.undefine(p);
        settings.undefine(p);

        assert!(settings.global().has("P"));
        assert_eq!(settings.tier_value(p, Tier::Global), Some(10));
        assert_eq!(settings.tier_value(p, Tier::Local), None);
    }

    #[test]
    fn repeated_local_sets_keep_one_entry() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        settings.set(p, 1, Tier::Local).unwrap();
        settings.set(p, 2, Tier::Local).unwrap();

        assert_eq!(settings.local().names(), ["P"]);
        assert_eq!(settings.get(p), 2);
        assert!(settings.is_overridden(p));
    }

    #[test]
    fn every_set_notifies_once() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        let (log, _) = record(&mut settings);

        settings.set(p, 1, Tier::Global).unwrap();
        settings.set(p, 1, Tier::Global).unwrap();
        settings.set(p, 3, Tier::Local).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            [
                ("P", Tier::Global, Value::Integer(1)),
                ("P", Tier::Global, Value::Integer(1)),
                ("P", Tier::Local, Value::Integer(3)),
            ]
        );
    }

    #[test]
    fn global_set_under_override_reports_effective_value() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        settings.set(p, 3, Tier::Local).unwrap();
        let (log, _) = record(&mut settings);

        settings.set(p, 50, Tier::Global).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            [("P", Tier::Global, Value::Integer(3))]
        );
    }

    #[test]
    fn undefine_notifies_only_when_effective_value_changes() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        settings.set(p, 42, Tier::Global).unwrap();
        let (log, _) = record(&mut settings);

        // No override: nothing happens.
        assert!(!settings.undefine(p));
        assert!(log.lock().unwrap().is_empty());

        // Override equal to the global value: removed silently.
        settings.set(p, 42, Tier::Local).unwrap();
        log.lock().unwrap().clear();
        assert!(settings.undefine(p));
        assert!(log.lock().unwrap().is_empty());

        // Override that differs: reverting is a change.
        settings.set(p, 7, Tier::Local).unwrap();
        log.lock().unwrap().clear();
        assert!(settings.undefine(p));
        assert_eq!(
            *log.lock().unwrap(),
            [("P", Tier::Local, Value::Integer(42))]
        );
    }

    #[test]
    fn removed_listener_is_not_called() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        let (log, id) = record(&mut settings);

        settings.set(p, 1, Tier::Global).unwrap();
        assert!(settings.remove_listener(id));
        assert!(!settings.remove_listener(id));
        settings.set(p, 2, Tier::Global).unwrap();

        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsaved_lists_global_before_local() {
        let Fixture {
            mut settings,
            p,
            accent,
        } = fixture();
        assert!(settings.unsaved().is_empty());

        settings.set(accent, String::from("red"), Tier::Local).unwrap();
        settings.set(accent, String::from("green"), Tier::Global).unwrap();
        settings.set(p, 11, Tier::Global).unwrap();
        assert_eq!(
            labels(&settings),
            ["global/settings", "global/theme", "local/theme"]
        );

        settings.save().unwrap();
        assert!(settings.unsaved().is_empty());
        assert_eq!(settings.global().persisted("P"), Some(&Value::Integer(11)));
        assert_eq!(
            settings.local().persisted("ACCENT"),
            Some(&Value::from("red"))
        );
    }

    #[test]
    fn initialize_loads_global_and_drops_unknown_names() {
        let global = MemoryStore::new()
            .with_persisted(Category::Settings, "P", Value::Integer(99))
            .with_persisted(Category::Settings, "RETIRED", Value::Bool(true));
        let Fixture { settings, p, .. } = fixture_with(global, MemoryStore::new());

        assert_eq!(settings.get(p), 99);
        assert!(!settings.global().has("RETIRED"));
        assert_eq!(settings.global().names(), ["ACCENT", "P"]);
    }

    #[test]
    fn initialize_reports_load_failure() {
        let mut registry = PropertyRegistry::new();
        registry.register("P", Category::Settings, 10_i64).unwrap();
        let global = MemoryStore::new().failing_load("bad header");

        let err = Settings::initialize(registry, global, MemoryStore::new()).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Store {
                tier: Tier::Global,
                source: StoreError::Malformed { .. }
            }
        ));
    }

    #[test]
    fn initialize_reports_conflicting_definition() {
        let mut global = MemoryStore::new();
        global
            .define(&Declaration::new("P", Category::Theme, Value::Integer(1)))
            .unwrap();
        let mut registry = PropertyRegistry::new();
        registry.register("P", Category::Settings, 10_i64).unwrap();

        let err = Settings::initialize(registry, global, MemoryStore::new()).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Store {
                source: StoreError::Conflict { .. },
                ..
            }
        ));
    }

    #[test]
    fn initialize_reports_mistyped_persisted_value() {
        let global =
            MemoryStore::new().with_persisted(Category::Settings, "P", Value::from("ten"));
        let mut registry = PropertyRegistry::new();
        registry.register("P", Category::Settings, 10_i64).unwrap();

        assert!(Settings::initialize(registry, global, MemoryStore::new()).is_err());
    }

    #[test]
    fn local_is_not_loaded_at_initialization() {
        let local = MemoryStore::new().with_persisted(Category::Settings, "P", Value::Integer(3));
        let Fixture { settings, p, .. } = fixture_with(MemoryStore::new(), local);

        assert_eq!(settings.get(p), 10);
        assert!(!settings.is_overridden(p));
    }

    #[test]
    fn failed_load_local_changes_nothing() {
        let local = MemoryStore::new()
            .with_persisted(Category::Theme, "ACCENT", Value::from("red"))
            .with_persisted(Category::Settings, "P", Value::from("ten"));
        let Fixture {
            mut settings,
            p,
            accent,
        } = fixture_with(MemoryStore::new(), local);
        settings.set(p, 4, Tier::Local).unwrap();
        let (log, _) = record(&mut settings);
        let unsaved_before = labels(&settings);

        let err = settings.load_local().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Store {
                tier: Tier::Local,
                source: StoreError::TypeMismatch { .. }
            }
        ));
        assert_eq!(settings.get(p), 4);
        assert_eq!(settings.get(accent), "blue");
        assert!(!settings.is_overridden(accent));
        assert_eq!(settings.local().names(), ["P"]);
        assert_eq!(labels(&settings), unsaved_before);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn nan_default_survives_initialization_and_local_sets() {
        let mut registry = PropertyRegistry::new();
        let gamma = registry
            .register("GAMMA", Category::Theme, f64::NAN)
            .unwrap();
        let global = MemoryStore::new().with_persisted(Category::Theme, "GAMMA", Value::Float(2.2));
        let mut settings = Settings::initialize(registry, global, MemoryStore::new()).unwrap();
        assert_eq!(settings.get(gamma), 2.2);

        settings.set(gamma, 1.0, Tier::Local).unwrap();
        settings.set(gamma, 1.8, Tier::Local).unwrap();
        assert_eq!(settings.get(gamma), 1.8);
        assert!(settings.undefine(gamma));
        assert_eq!(settings.get(gamma), 2.2);
    }

    #[test]
    fn load_local_applies_overrides_and_notifies() {
        let local = MemoryStore::new()
            .with_persisted(Category::Settings, "P", Value::Integer(3))
            .with_persisted(Category::Theme, "GHOST", Value::from("x"));
        let Fixture {
            mut settings, p, ..
        } = fixture_with(MemoryStore::new(), local);
        let (log, _) = record(&mut settings);

        settings.load_local().unwrap();
        assert_eq!(settings.get(p), 3);
        assert!(settings.is_overridden(p));
        assert!(!settings.local().has("GHOST"));
        assert_eq!(
            *log.lock().unwrap(),
            [("P", Tier::Local, Value::Integer(3))]
        );
    }

    #[test]
    fn untyped_access_matches_typed() {
        let Fixture {
            mut settings,
            accent,
            ..
        } = fixture();
        settings
            .set_value(accent.id(), Value::from("teal"), Tier::Local)
            .unwrap();
        assert_eq!(settings.value(accent.id()), &Value::from("teal"));
        assert_eq!(settings.get(accent), "teal");

        let err = settings
            .set_value(accent.id(), Value::Integer(1), Tier::Global)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Store {
                tier: Tier::Global,
                source: StoreError::TypeMismatch { .. }
            }
        ));
        assert!(settings.undefine_id(accent.id()));
        assert_eq!(settings.get(accent), "blue");
    }

    #[test]
    fn rejected_local_write_leaves_no_override() {
        let Fixture {
            mut settings, p, ..
        } = fixture();
        let (log, _) = record(&mut settings);

        assert!(
            settings
                .set_value(p.id(), Value::from("loud"), Tier::Local)
                .is_err()
        );
        assert!(!settings.is_overridden(p));
        assert!(settings.unsaved().is_empty());
        assert!(log.lock().unwrap().is_empty());

        // Integers widen into float properties on the way in.
        let mut registry = PropertyRegistry::new();
        let scale = registry.register("SCALE", Category::Theme, 1.0_f64).unwrap();
        let mut settings =
            Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
        settings
            .set_value(scale.id(), Value::Integer(2), Tier::Local)
            .unwrap();
        assert_eq!(settings.get(scale), 2.0);
    }

    #[test]
    #[should_panic(expected = "not declared")]
    fn foreign_handle_panics() {
        let Fixture { settings, .. } = fixture();
        let stranger: Property<i64> = Property::from_id(PropertyId::new(40));
        let _ = settings.get(stranger);
    }

    #[test]
    fn display_labels() {
        let unsaved = UnsavedCategory {
            tier: Tier::Local,
            category: Category::Theme,
        };
        assert_eq!(unsaved.to_string(), "local/theme");
        assert_eq!(Tier::Global.to_string(), "global");
    }
}
