// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The application's built-in properties.

use crate::category::Category;
use crate::id::Property;
use crate::registry::{DeclarationError, PropertyRegistry};

/// Name of the locale property.
pub const LOCALE: &str = "LOCALE";

/// Default locale tag.
pub const DEFAULT_LOCALE: &str = "en";

/// Typed handles to the built-in properties.
#[derive(Copy, Clone, Debug)]
pub struct StandardProperties {
    /// User interface language, as a language tag.
    pub locale: Property<String>,
}

impl StandardProperties {
    /// Declares the built-in properties in `registry`.
    pub fn register(registry: &mut PropertyRegistry) -> Result<Self, DeclarationError> {
        Ok(Self {
            locale: registry.register(LOCALE, Category::Settings, DEFAULT_LOCALE.to_owned())?,
        })
    }

    /// Creates a registry holding only the built-in properties.
    pub fn registry() -> Result<(PropertyRegistry, Self), DeclarationError> {
        let mut registry = PropertyRegistry::new();
        let properties = Self::register(&mut registry)?;
        Ok((registry, properties))
    }
}
