//! Metadata values as produced by the extraction tools.
//!
//! Tool output is arbitrary JSON. Instead of inspecting `serde_json::Value`
//! shapes at every level, values are lifted once into [`MetadataValue`], a
//! closed sum type that the flattener and renderer match on exhaustively.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Mapping from key to value; iteration order is document order.
pub type MetadataNode = IndexMap<String, MetadataValue>;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MetadataValue {
    /// JSON `null`; never rendered.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar, kept in its original JSON precision.
    Number(Number),
    /// String scalar.
    String(String),
    /// Ordered list, rendered opaquely and never recursed into.
    Sequence(Vec<MetadataValue>),
    /// Nested mapping, recursed into by the flattener.
    Node(MetadataNode),
}

impl MetadataValue {
    /// Borrow the nested node, if this is one.
    #[must_use]
    pub const fn as_node(&self) -> Option<&MetadataNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Borrow the string, if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// JavaScript-style truthiness.
    ///
    /// Used when deciding whether an `error` member marks a failed tool:
    /// `null`, `false`, `0` and `""` are falsy, everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Self::String(s) => !s.is_empty(),
            Self::Sequence(_) | Self::Node(_) => true,
        }
    }

    /// Convert back to a JSON value without consuming `self`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Node(node) => Value::Object(
                node.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for MetadataValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Node(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<MetadataValue> for Value {
    fn from(value: MetadataValue) -> Self {
        match value {
            MetadataValue::Null => Self::Null,
            MetadataValue::Bool(b) => Self::Bool(b),
            MetadataValue::Number(n) => Self::Number(n),
            MetadataValue::String(s) => Self::String(s),
            MetadataValue::Sequence(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            MetadataValue::Node(node) => Self::Object(
                node.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}
