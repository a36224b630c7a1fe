//! Shape classifier (Component C): decides how an array is rendered.

use serde_json::{Map, Value};

/// The four rendering shapes an array can take (spec §4.C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayShape {
    /// `[]` or `[0]` — no elements, nothing follows on the header line.
    Empty,
    /// All elements are scalars (any mix of number/string/bool/null):
    /// rendered on the header line, delimiter-separated.
    InlinePrimitive,
    /// All elements are objects sharing the identical, non-empty set of
    /// scalar-valued keys in the same order: rendered as a field header
    /// plus one delimiter-separated row per element.
    Tabular,
    /// Anything else: one `-`-prefixed child block per element.
    List,
}

/// Classify `items` into the shape the encoder should use.
pub(crate) fn classify(items: &[Value]) -> ArrayShape {
    if items.is_empty() {
        return ArrayShape::Empty;
    }
    if items.iter().all(is_scalar) {
        return ArrayShape::InlinePrimitive;
    }
    if let Some(_fields) = tabular_fields(items) {
        return ArrayShape::Tabular;
    }
    ArrayShape::List
}

fn is_scalar(v: &Value) -> bool {
    !matches!(v, Value::Object(_) | Value::Array(_))
}

/// If every item is a non-empty object with the identical ordered set of
/// scalar-valued keys, return that key list. Otherwise `None`.
pub(crate) fn tabular_fields(items: &[Value]) -> Option<Vec<String>> {
    let first = match items.first()? {
        Value::Object(map) => map,
        _ => return None,
    };
    if first.is_empty() {
        return None;
    }
    let fields: Vec<String> = first.keys().cloned().collect();
    if !all_scalar_values(first) {
        return None;
    }
    for item in &items[1..] {
        let map = match item {
            Value::Object(map) => map,
            _ => return None,
        };
        if !same_keys_in_order(&fields, map) || !all_scalar_values(map) {
            return None;
        }
    }
    Some(fields)
}

fn all_scalar_values(map: &Map<String, Value>) -> bool {
    map.values().all(is_scalar)
}

fn same_keys_in_order(fields: &[String], map: &Map<String, Value>) -> bool {
    if map.len() != fields.len() {
        return false;
    }
    map.keys().zip(fields.iter()).all(|(a, b)| a == b)
}
