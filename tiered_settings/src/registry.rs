// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property registry.
//!
//! This module provides [`PropertyRegistry`], the data-driven table of every
//! [`Declaration`] the application knows about.

use hashbrown::HashMap;
use thiserror::Error;

use crate::category::Category;
use crate::id::{Property, PropertyId};
use crate::value::{PropertyValue, Value, ValueKind};

/// The fixed description of one property.
///
/// A declaration means the same thing in every tier; only value storage is
/// tier-specific.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    name: &'static str,
    category: Category,
    kind: ValueKind,
    default: Value,
}

impl Declaration {
    /// Creates a declaration.
    ///
    /// The kind is taken from `default`.
    #[must_use]
    pub fn new(name: &'static str, category: Category, default: Value) -> Self {
        Self {
            name,
            category,
            kind: default.kind(),
            default,
        }
    }

    /// Returns the stable name stores are keyed by.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the category this property is persisted in.
    #[must_use]
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the semantic type of the property.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns the default value.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

/// Errors raised while declaring properties.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Property names must be non-empty.
    #[error("property name is empty")]
    EmptyName,

    /// The name was declared twice.
    #[error("property `{0}` is already declared")]
    Duplicate(&'static str),

    /// The registry is full.
    #[error("too many properties declared (max {})", u16::MAX)]
    Capacity,
}

/// The set of declared properties.
///
/// Properties are registered once at startup; the registry then hands out
/// lookups by name or id and iteration in registration order.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{Category, PropertyRegistry, ValueKind};
///
/// let mut registry = PropertyRegistry::new();
/// let accent = registry
///     .register("ACCENT", Category::Theme, String::from("#0078d4"))
///     .unwrap();
///
/// let declaration = registry.declaration(accent.id()).unwrap();
/// assert_eq!(declaration.category(), Category::Theme);
/// assert_eq!(declaration.kind(), ValueKind::Text);
/// assert_eq!(registry.by_name("ACCENT"), Some(accent.id()));
/// ```
#[derive(Default)]
pub struct PropertyRegistry {
    declarations: Vec<Declaration>,
    by_name: HashMap<&'static str, PropertyId>,
}

impl PropertyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a property and returns its typed handle.
    ///
    /// The semantic type comes from `T`, the default from `default`.
    pub fn register<T: PropertyValue>(
        &mut self,
        name: &'static str,
        category: Category,
        default: T,
    ) -> Result<Property<T>, DeclarationError> {
        self.declare(Declaration::new(name, category, default.into_value()))
            .map(Property::from_id)
    }

    /// Declares a property from an untyped declaration.
    pub fn declare(&mut self, declaration: Declaration) -> Result<PropertyId, DeclarationError> {
        let name = declaration.name;
        if name.is_empty() {
            return Err(DeclarationError::EmptyName);
        }
        if self.by_name.contains_key(name) {
            return Err(DeclarationError::Duplicate(name));
        }
        let index =
            u16::try_from(self.declarations.len()).map_err(|_| DeclarationError::Capacity)?;
        if index == u16::MAX {
            return Err(DeclarationError::Capacity);
        }

        let id = PropertyId::new(index);
        self.declarations.push(declaration);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Returns the number of declared properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<PropertyId> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of a property.
    #[must_use]
    pub fn name(&self, id: PropertyId) -> Option<&'static str> {
        self.declaration(id).map(Declaration::name)
    }

    /// Returns the declaration of a property.
    #[must_use]
    pub fn declaration(&self, id: PropertyId) -> Option<&Declaration> {
        self.declarations.get(usize::from(id.index()))
    }

    /// Returns the declaration registered under `name`.
    #[must_use]
    pub fn declaration_by_name(&self, name: &str) -> Option<&Declaration> {
        self.by_name(name).and_then(|id| self.declaration(id))
    }

    /// Returns an iterator over all declarations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &Declaration)> {
        self.declarations.iter().enumerate().map(|(i, d)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            (PropertyId::new(i as u16), d)
        })
    }
}

impl core::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.declarations.len())
            .field(
                "properties",
                &self.declarations.iter().map(|d| d.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
