//! Client-side validation of new metadata fields.
//!
//! Runs before any request is made and has no side effects. The service
//! strips non-alphanumeric characters from keys on its own; rejecting them
//! here instead means the user sees exactly the key that will be written.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::model::{FieldCategory, FieldEntry};

/// Accepted key characters once whitespace has been removed.
static KEY_CHARSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Validate a key/value pair before submission.
///
/// The key comes from `raw_key` when `is_custom` is set and from
/// `selected_preset` otherwise. Both key and value are trimmed and must be
/// non-empty; the key then has all whitespace removed and must consist only
/// of ASCII letters and digits.
pub fn validate(
    raw_key: &str,
    raw_value: &str,
    is_custom: bool,
    selected_preset: &str,
) -> Result<FieldEntry, ValidationError> {
    let key_source = if is_custom { raw_key } else { selected_preset };

    let key = key_source.trim();
    let value = raw_value.trim();
    if key.is_empty() || value.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    let key: String = key.chars().filter(|c| !c.is_whitespace()).collect();
    if !KEY_CHARSET.is_match(&key) {
        return Err(ValidationError::InvalidKeyCharset { key });
    }

    Ok(FieldEntry {
        key,
        value: value.to_string(),
        is_custom,
    })
}

/// Raw form state for adding a field.
///
/// Mirrors an entry form with a category selector, a free-form key input
/// (used for [`FieldCategory::Custom`]), a preset selector and a value input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    /// Selected category.
    pub category: FieldCategory,
    /// Free-form key text.
    pub custom_key: String,
    /// Selected preset name (empty when none is chosen).
    pub preset: String,
    /// Value text.
    pub value: String,
}

impl FieldInput {
    /// Input for a free-form key.
    #[must_use]
    pub fn custom(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: FieldCategory::Custom,
            custom_key: key.into(),
            preset: String::new(),
            value: value.into(),
        }
    }

    /// Input for a preset key within a category.
    #[must_use]
    pub fn preset(category: FieldCategory, preset: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category,
            custom_key: String::new(),
            preset: preset.into(),
            value: value.into(),
        }
    }

    /// Run [`validate`] on this input.
    pub fn validate(&self) -> Result<FieldEntry, ValidationError> {
        validate(&self.custom_key, &self.value, self.category.is_custom(), &self.preset)
    }
}
