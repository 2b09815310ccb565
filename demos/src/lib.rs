// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces of the `tiered_settings` demos: a sample property set and
//! parsing of command-line values.

use tiered_settings::standard::StandardProperties;
use tiered_settings::{
    Category, DeclarationError, Property, PropertyRegistry, Value, ValueKind,
};

/// Properties declared by the demo application.
#[derive(Copy, Clone, Debug)]
pub struct DemoProperties {
    /// Built-in properties.
    pub standard: StandardProperties,
    /// Output volume, 0 to 100.
    pub volume: Property<i64>,
    /// Whether the run timer is shown.
    pub show_timer: Property<bool>,
    /// Interface scale factor.
    pub scale: Property<f64>,
    /// Accent color name.
    pub accent: Property<String>,
}

impl DemoProperties {
    /// Builds the demo registry.
    pub fn registry() -> Result<(PropertyRegistry, Self), DeclarationError> {
        let mut registry = PropertyRegistry::new();
        let standard = StandardProperties::register(&mut registry)?;
        let properties = Self {
            standard,
            volume: registry.register("VOLUME", Category::Settings, 80_i64)?,
            show_timer: registry.register("SHOW_TIMER", Category::Settings, true)?,
            scale: registry.register("SCALE", Category::Theme, 1.0_f64)?,
            accent: registry.register("ACCENT", Category::Theme, String::from("blue"))?,
        };
        Ok((registry, properties))
    }
}

/// Parses command-line text as a value of `kind`.
///
/// Booleans accept `true`/`false`, `on`/`off` and `yes`/`no`. Text is taken
/// verbatim.
///
/// ```rust
/// use tiered_settings::{Value, ValueKind};
/// use tiered_settings_demos::parse_value;
///
/// assert_eq!(parse_value(ValueKind::Bool, "off"), Some(Value::Bool(false)));
/// assert_eq!(parse_value(ValueKind::Float, "1.25"), Some(Value::Float(1.25)));
/// assert_eq!(parse_value(ValueKind::Integer, "loud"), None);
/// ```
#[must_use]
pub fn parse_value(kind: ValueKind, text: &str) -> Option<Value> {
    match kind {
        ValueKind::Bool => match text.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" => Some(Value::Bool(true)),
            "false" | "off" | "no" => Some(Value::Bool(false)),
            _ => None,
        },
        ValueKind::Integer => text.parse().ok().map(Value::Integer),
        ValueKind::Float => text.parse().ok().map(Value::Float),
        ValueKind::Text => Some(Value::Text(text.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_registry_covers_every_kind() {
        let (registry, _) = DemoProperties::registry().unwrap();
        let kinds: Vec<_> = registry.iter().map(|(_, d)| d.kind()).collect();
        for kind in [
            ValueKind::Bool,
            ValueKind::Integer,
            ValueKind::Float,
            ValueKind::Text,
        ] {
            assert!(kinds.contains(&kind), "no {kind} property");
        }
    }

    #[test]
    fn integers_parse_as_floats() {
        assert_eq!(parse_value(ValueKind::Float, "2"), Some(Value::Float(2.0)));
        assert_eq!(parse_value(ValueKind::Integer, "2.5"), None);
        assert_eq!(parse_value(ValueKind::Bool, "YES"), Some(Value::Bool(true)));
    }
}
