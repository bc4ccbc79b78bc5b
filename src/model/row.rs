//! Flattened, display-ready rows.

use serde::{Deserialize, Serialize};

/// One display row derived from a tool's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    /// Tool that produced the row.
    pub tool: String,
    /// Underscore-joined path of keys from the tool root to the leaf.
    pub key_path: String,
    /// Human-readable label derived from the leaf key only.
    pub label: String,
    /// Rendered value.
    pub value: String,
    /// Whether this row reports a tool failure.
    pub is_error: bool,
}

impl FlatRow {
    /// Create a regular metadata row.
    #[must_use]
    pub fn new(
        tool: impl Into<String>,
        key_path: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            key_path: key_path.into(),
            label: label.into(),
            value: value.into(),
            is_error: false,
        }
    }

    /// Create the error row for a failed tool.
    #[must_use]
    pub fn error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            key_path: ERROR_KEY_PATH.to_string(),
            label: ERROR_LABEL.to_string(),
            value: message.into(),
            is_error: true,
        }
    }
}

/// Label shown on a tool's error row.
pub const ERROR_LABEL: &str = "Error";

/// Key path of a tool's error row.
pub const ERROR_KEY_PATH: &str = "error";

/// All rows produced by one tool, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSection {
    /// Tool name.
    pub tool: String,
    /// Rows in document order.
    pub rows: Vec<FlatRow>,
}

impl ToolSection {
    /// Whether this section is a single tool-failure row.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.rows.as_slice(), [row] if row.is_error)
    }

    /// Tool name as shown in section headers.
    #[must_use]
    pub fn heading(&self) -> String {
        self.tool.to_uppercase()
    }
}
