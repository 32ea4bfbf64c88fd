//! Record trait - how the index reads fields out of opaque entries
//!
//! Entries are caller-defined; the index only needs two views of them:
//! a named scalar field (for dimensions and grouping) and a named numeric
//! field (for measures). `serde_json::Value` objects work out of the box;
//! concrete structs implement the trait directly.

use crate::value::FieldValue;
use std::collections::HashMap;

/// Read access to an entry's named fields
pub trait Record {
    /// The entry's value for a dimension or grouping field
    ///
    /// `None` when the entry carries no such field; the entry then lands in
    /// no bucket for that dimension.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// The entry's value for a numeric measure field
    fn measure(&self, name: &str) -> Option<f64>;
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).and_then(FieldValue::from_json)
    }

    fn measure(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_f64())
    }
}

impl Record for HashMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }

    fn measure(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(FieldValue::Int(n)) => Some(*n as f64),
            _ => None,
        }
    }
}
