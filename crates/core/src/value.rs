//! Extracted-data values.
//!
//! Extraction results arrive as arbitrary JSON. They are modelled as an
//! explicit tagged union so every consumer (flattener, renderer, exporter)
//! matches on the shape instead of probing types at runtime. Objects keep
//! key insertion order end to end.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A leaf value inside extracted data.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Printable form used by flat exports and leaf copy actions. Never fails.
    ///
    /// Integral floats print without a fractional part (`2.0` → `"2"`).
    pub fn printable(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::String(s) => s.clone(),
            Scalar::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    return n.to_string();
                }
                match n.as_f64() {
                    Some(f) if f == 0.0 => "0".to_string(),
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.printable())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(whole_number(n)),
            Scalar::String(s) => Value::String(s),
        }
    }
}

/// Whole-number floats become integers, so `1375.0` serializes as `1375`
/// inside lists and JSON exports just as it prints as a leaf.
fn whole_number(n: Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9_223_372_036_854_775_808.0 => {
            Number::from(f as i64)
        }
        _ => n,
    }
}

/// Recursive extracted-data shape: scalar, list, or ordered object.
///
/// The store never produces cyclic values and none are guarded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum StructuredValue {
    Scalar(Scalar),
    List(Vec<StructuredValue>),
    Object(IndexMap<String, StructuredValue>),
}

impl StructuredValue {
    pub fn as_object(&self) -> Option<&IndexMap<String, StructuredValue>> {
        match self {
            StructuredValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// True for empty objects and empty lists. Scalars are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            StructuredValue::Object(map) => map.is_empty(),
            StructuredValue::List(items) => items.is_empty(),
            StructuredValue::Scalar(_) => false,
        }
    }

    pub fn to_json(&self) -> Value {
        Value::from(self.clone())
    }

    /// Single-line JSON, e.g. `[{"qty":1}]`.
    pub fn to_compact_json(&self) -> String {
        self.to_json().to_string()
    }

    /// JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> String {
        format!("{:#}", self.to_json())
    }
}

impl From<Value> for StructuredValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StructuredValue::Scalar(Scalar::Null),
            Value::Bool(b) => StructuredValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => StructuredValue::Scalar(Scalar::Number(n)),
            Value::String(s) => StructuredValue::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                StructuredValue::List(items.into_iter().map(StructuredValue::from).collect())
            }
            Value::Object(map) => StructuredValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, StructuredValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<StructuredValue> for Value {
    fn from(value: StructuredValue) -> Self {
        match value {
            StructuredValue::Scalar(s) => Value::from(s),
            StructuredValue::List(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            StructuredValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}
