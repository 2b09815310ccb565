// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A cloneable, thread-safe handle to a [`Settings`] service.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::category::Category;
use crate::id::Property;
use crate::listeners::{ChangeEvent, ListenerId};
use crate::settings::{Settings, SettingsError, Tier, UnsavedCategory};
use crate::store::BackingStore;
use crate::value::PropertyValue;

/// Shares one [`Settings`] service between threads.
///
/// Every operation takes the same lock, so reads, writes, override removal,
/// listener registration and notification form a single critical section.
/// Listeners run while the lock is held and must not call back into the
/// handle; the [`ChangeEvent`] they receive carries the new value instead.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{Category, MemoryStore, PropertyRegistry, Settings, SharedSettings, Tier};
///
/// let mut registry = PropertyRegistry::new();
/// let p = registry.register("P", Category::Settings, 10_i64).unwrap();
/// let settings =
///     Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
///
/// let shared = SharedSettings::new(settings);
/// let writer = shared.clone();
/// std::thread::spawn(move || writer.set(p, 7, Tier::Local).unwrap())
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.get(p), 7);
/// ```
pub struct SharedSettings<G, L> {
    inner: Arc<Mutex<Settings<G, L>>>,
}

impl<G, L> Clone for SharedSettings<G, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: BackingStore, L: BackingStore> SharedSettings<G, L> {
    /// Wraps `settings` for sharing.
    #[must_use]
    pub fn new(settings: Settings<G, L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(settings)),
        }
    }

    /// Runs `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut Settings<G, L>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// See [`Settings::get`].
    #[must_use]
    pub fn get<T: PropertyValue>(&self, property: Property<T>) -> T {
        self.inner.lock().get(property)
    }

    /// See [`Settings::set`].
    pub fn set<T: PropertyValue>(
        &self,
        property: Property<T>,
        value: T,
        tier: Tier,
    ) -> Result<(), SettingsError> {
        self.inner.lock().set(property, value, tier)
    }

    /// See [`Settings::undefine`].
    pub fn undefine<T: PropertyValue>(&self, property: Property<T>) -> bool {
        self.inner.lock().undefine(property)
    }

    /// See [`Settings::add_listener`].
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&ChangeEvent<'_>) + Send + 'static,
    {
        self.inner.lock().add_listener(listener)
    }

    /// See [`Settings::remove_listener`].
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.lock().remove_listener(id)
    }

    /// See [`Settings::unsaved`].
    #[must_use]
    pub fn unsaved(&self) -> Vec<UnsavedCategory> {
        self.inner.lock().unsaved()
    }

    /// Returns `true` if `category` has unsaved changes in either tier.
    #[must_use]
    pub fn is_unsaved(&self, category: Category) -> bool {
        self.unsaved().iter().any(|u| u.category == category)
    }

    /// See [`Settings::save`].
    pub fn save(&self) -> Result<(), SettingsError> {
        self.inner.lock().save()
    }
}

impl<G, L> core::fmt::Debug for SharedSettings<G, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSettings")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::registry::PropertyRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn concurrent_writers_each_notify_once() {
        let mut registry = PropertyRegistry::new();
        let p = registry.register("P", Category::Settings, 0_i64).unwrap();
        let settings =
            Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
        let shared = SharedSettings::new(settings);

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        shared.add_listener(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..4_i64)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        shared.set(p, i * 100 + j, Tier::Global).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 100);
        assert!(shared.is_unsaved(Category::Settings));
        shared.save().unwrap();
        assert!(shared.unsaved().is_empty());
    }

    #[test]
    fn with_gives_exclusive_access() {
        let mut registry = PropertyRegistry::new();
        let p = registry.register("P", Category::Theme, true).unwrap();
        let settings =
            Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
        let shared = SharedSettings::new(settings);

        let overridden = shared.with(|s| {
            s.set(p, false, Tier::Local).unwrap();
            s.is_overridden(p)
        });
        assert!(overridden);
        assert!(shared.undefine(p));
        assert!(shared.get(p));
    }
}
