// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values.
//!
//! Backing stores hold [`Value`]s, a closed set of semantic types that every
//! store can persist. [`PropertyValue`] maps Rust types onto it so that typed
//! handles can read and write without going through the enum by hand.

use core::fmt;

/// The semantic type of a property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    /// `true` / `false`.
    Bool,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// UTF-8 text.
    Text,
}

impl ValueKind {
    /// Returns the lower-case name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored property value.
///
/// # Example
///
/// ```rust
/// use tiered_settings::{Value, ValueKind};
///
/// let value = Value::from(42_i64);
/// assert_eq!(value.kind(), ValueKind::Integer);
///
/// // Integers widen into float properties, nothing else converts.
/// assert_eq!(value.coerce(ValueKind::Float), Some(Value::Float(42.0)));
/// assert_eq!(value.coerce(ValueKind::Text), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A float.
    Float(f64),
    /// Text.
    Text(String),
}

impl Value {
    /// Returns the semantic type of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Converts this value to `kind`, if the conversion is lossless enough to
    /// accept from a hand-edited file.
    ///
    /// Identity conversions always succeed; an integer widens to a float.
    #[must_use]
    pub fn coerce(&self, kind: ValueKind) -> Option<Self> {
        match (self, kind) {
            (value, kind) if value.kind() == kind => Some(value.clone()),
            // Files may omit the decimal point.
            (Self::Integer(i), ValueKind::Float) => Some(Self::Float(*i as f64)),
            _ => None,
        }
    }

    /// Returns `true` if both values are the same stored value.
    ///
    /// Unlike `==`, floats compare by bit pattern, so a NaN is the same as
    /// itself and `0.0` differs from `-0.0`.
    ///
    /// ```rust
    /// use tiered_settings::Value;
    ///
    /// assert!(Value::Float(f64::NAN).same_as(&Value::Float(f64::NAN)));
    /// assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    /// ```
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the text, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// A Rust type that can be the value type of a [`Property`](crate::Property).
pub trait PropertyValue: Clone + 'static {
    /// The semantic type this Rust type is stored as.
    const KIND: ValueKind;

    /// Wraps `self` in a [`Value`].
    fn into_value(self) -> Value;

    /// Extracts `Self` from a value of kind [`Self::KIND`].
    ///
    /// Returns `None` for any other kind.
    fn from_value(value: &Value) -> Option<Self>;
}

impl PropertyValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl PropertyValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl PropertyValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl PropertyValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

impl<T: PropertyValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.into_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
        assert_eq!(Value::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("en").kind(), ValueKind::Text);
    }

    #[test]
    fn coerce_only_widens_integers() {
        assert_eq!(
            Value::Integer(3).coerce(ValueKind::Float),
            Some(Value::Float(3.0))
        );
        assert_eq!(Value::Float(3.0).coerce(ValueKind::Integer), None);
        assert_eq!(Value::Bool(true).coerce(ValueKind::Text), None);
        assert_eq!(
            Value::from("x").coerce(ValueKind::Text),
            Some(Value::from("x"))
        );
    }

    #[test]
    fn same_as_compares_float_bits() {
        let nan = Value::Float(f64::NAN);
        assert!(nan.same_as(&nan.clone()));
        assert!(!Value::Float(0.0).same_as(&Value::Float(-0.0)));
        assert!(Value::from("x").same_as(&Value::from("x")));
        assert!(!Value::Integer(1).same_as(&Value::Float(1.0)));
    }

    #[test]
    fn property_values_reject_other_kinds() {
        assert_eq!(i64::from_value(&Value::Integer(9)), Some(9));
        assert_eq!(i64::from_value(&Value::Float(9.0)), None);
        assert_eq!(
            String::from_value(&Value::from("fr")),
            Some(String::from("fr"))
        );
        assert_eq!(bool::from_value(&Value::from("true")), None);
    }

    #[test]
    fn display_quotes_text() {
        assert_eq!(Value::from("en").to_string(), "\"en\"");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(ValueKind::Float.to_string(), "float");
    }
}
