// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property identification types.
//!
//! This module provides [`PropertyId`] for runtime property identification and
//! [`Property<T>`] for type-safe keys handed out by the registry.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A runtime property identifier.
///
/// This is a compact handle (u16) indexing a declaration inside a
/// [`PropertyRegistry`](crate::PropertyRegistry). Backing stores never see it;
/// they are keyed by the declaration's name.
///
/// # Example
///
/// ```rust
/// use tiered_settings::PropertyId;
///
/// let id = PropertyId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Creates a property ID from the given index.
    ///
    /// This is normally called by
    /// [`PropertyRegistry::register`](crate::PropertyRegistry::register).
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A typed property key.
///
/// Wraps a [`PropertyId`] with a phantom value type so that
/// [`Settings::get`](crate::Settings::get) and [`Settings::set`](crate::Settings::set)
/// are checked at compile time:
///
/// ```rust
/// use tiered_settings::{Category, Property, PropertyRegistry};
///
/// let mut registry = PropertyRegistry::new();
/// let volume: Property<i64> = registry
///     .register("VOLUME", Category::Settings, 80_i64)
///     .unwrap();
///
/// // settings.set(volume, "loud", Tier::Global); // would not compile
/// assert_eq!(registry.name(volume.id()), Some("VOLUME"));
/// ```
pub struct Property<T> {
    id: PropertyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    /// Creates a typed property from a property ID.
    ///
    /// The caller must make sure the id was registered with the same `T`;
    /// reading through a mismatched handle panics.
    #[must_use]
    #[inline]
    pub const fn from_id(id: PropertyId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying property ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> PropertyId {
        self.id
    }
}

// Manual impls so that `T` needs no bounds.

impl<T> Copy for Property<T> {}

impl<T> Clone for Property<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Property<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Property<T> {}

impl<T> Hash for Property<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}

impl<T> From<Property<T>> for PropertyId {
    #[inline]
    fn from(property: Property<T>) -> Self {
        property.id
    }
}
