//! Field values - the scalar type used as dimension and grouping keys
//!
//! Dimension values must be usable as dictionary keys, so the type is limited
//! to strings and integers (`f64` is neither `Eq` nor `Hash`). Measures are
//! plain `f64` and live outside this type; see [`crate::record::Record`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar field value observed on an entry
///
/// Serializes untagged, so JSON `"east"` and `3` round-trip naturally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String-valued field
    Str(String),
    /// Integer-valued field
    Int(i64),
}

impl FieldValue {
    /// Convert a JSON value into a field value, if it is key-shaped
    ///
    /// Strings and integer numbers convert; everything else (floats, bools,
    /// arrays, objects, null) yields `None` and is not indexable.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(FieldValue::Str(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(FieldValue::Int),
            _ => None,
        }
    }

    /// The string content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }

    /// The integer content, if this is an integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Str(_) => None,
            FieldValue::Int(n) => Some(*n),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Int(n as i64)
    }
}
