//! Display text for metadata values.

use std::num::FpCategory;

use serde_json::{Number, Value};

use crate::model::MetadataValue;

/// Render a metadata value for display.
///
/// Returns `None` for null values: the row is skipped, which is not an error.
/// Sequences are rendered as indented JSON of the whole list and are never
/// recursed into. Nested nodes are normally expanded by the flattener; when
/// rendered directly they use the same indented JSON form so the function
/// stays total.
#[must_use]
pub fn render_value(value: &MetadataValue) -> Option<String> {
    match value {
        MetadataValue::Null => None,
        MetadataValue::Bool(b) => Some(b.to_string()),
        MetadataValue::Number(n) => Some(render_number(n)),
        MetadataValue::String(s) => Some(s.clone()),
        MetadataValue::Sequence(_) | MetadataValue::Node(_) => Some(pretty_json(&value.to_json())),
    }
}

/// Canonical text of a JSON number.
///
/// Integers print as integers. Floats use the shortest round-trip digits in
/// the layout a browser gives `String(n)`: positional for magnitudes in
/// `[1e-6, 1e21)`, exponential with a signed power outside it. Integral
/// floats drop their fractional part (`1.0` renders as `1`) and both zeros
/// render as `0`.
#[must_use]
pub fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => render_float(f),
        None => n.to_string(),
    }
}

fn render_float(f: f64) -> String {
    if f.classify() == FpCategory::Zero {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&f.abs()) {
        return f.to_string();
    }

    let exponential = format!("{f:e}");
    match exponential.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exponential,
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
