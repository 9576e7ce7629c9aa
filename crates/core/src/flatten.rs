//! Collapse nested extracted data into dotted-path columns.

use indexmap::IndexMap;

use crate::value::{Scalar, StructuredValue};

/// Dotted path → leaf value, in depth-first key-insertion order.
///
/// Lists are stored as their compact JSON text; every other leaf keeps its
/// scalar and is stringified only when written out.
pub type FlatRecord = IndexMap<String, Scalar>;

/// Flatten `value` with every path prefixed by `prefix`.
///
/// Objects are descended; lists are opaque leaves (never `items.0.qty`).
/// A top-level scalar or list lands under `prefix` itself. Empty objects
/// contribute no paths.
pub fn flatten(value: &StructuredValue, prefix: &str) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(value, prefix, &mut out);
    out
}

fn flatten_into(value: &StructuredValue, path: &str, out: &mut FlatRecord) {
    match value {
        StructuredValue::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(child, &child_path, out);
            }
        }
        StructuredValue::List(_) => {
            out.insert(path.to_string(), Scalar::String(value.to_compact_json()));
        }
        StructuredValue::Scalar(s) => {
            out.insert(path.to_string(), s.clone());
        }
    }
}
