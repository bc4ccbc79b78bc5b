//! The multi-tool metadata document returned by the extraction service.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{MetaviewError, Result};

use super::file_info::FileInfo;
use super::value::{MetadataNode, MetadataValue};

/// Name of the tool entry that carries basic file information.
pub const FILE_INFO_TOOL: &str = "file_info";

/// Member that marks a tool result as failed.
pub const ERROR_MEMBER: &str = "error";

/// Outcome of one extraction tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// The tool failed; the message is shown as an error row.
    Error(String),
    /// The tool produced metadata.
    Node(MetadataNode),
}

impl ToolResult {
    /// Classify a raw tool value.
    ///
    /// Objects with a truthy `error` member are failures. Arrays are treated
    /// as nodes keyed by element index. Null and scalar tool values carry no
    /// metadata and yield `None`.
    #[must_use]
    pub fn from_value(value: MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Node(node) => match node.get(ERROR_MEMBER) {
                Some(error) if error.is_truthy() => Some(Self::Error(error_message(error))),
                _ => Some(Self::Node(node)),
            },
            MetadataValue::Sequence(items) => Some(Self::Node(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Whether this result is a tool failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Borrow the metadata node, if the tool succeeded.
    #[must_use]
    pub const fn as_node(&self) -> Option<&MetadataNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Error(_) => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Error(message) => {
                let mut map = serde_json::Map::new();
                map.insert(ERROR_MEMBER.to_string(), Value::String(message.clone()));
                Value::Object(map)
            }
            Self::Node(node) => MetadataValue::Node(node.clone()).to_json(),
        }
    }
}

fn error_message(error: &MetadataValue) -> String {
    match error {
        MetadataValue::String(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

/// Metadata for one file, keyed by tool name in display order.
///
/// A document is built once per service response and replaced wholesale;
/// there are no mutating accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataDocument {
    tools: IndexMap<String, ToolResult>,
}

impl MetadataDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| MetaviewError::SerializationError {
            context: "Failed to parse metadata document".to_string(),
            source: e,
        })?;
        Self::from_value(value)
    }

    /// Build a document from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(MetaviewError::invalid_document(format!(
                "expected an object keyed by tool name, found {}",
                json_kind(&value)
            )));
        };

        let mut tools = IndexMap::with_capacity(map.len());
        for (tool, raw) in map {
            match ToolResult::from_value(MetadataValue::from(raw)) {
                Some(result) => {
                    tools.insert(tool, result);
                }
                None => debug!(tool = %tool, "Dropping tool entry without metadata"),
            }
        }

        Ok(Self { tools })
    }

    /// Iterate tools in document order.
    pub fn tools(&self) -> impl Iterator<Item = (&str, &ToolResult)> {
        self.tools.iter().map(|(name, result)| (name.as_str(), result))
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, tool: &str) -> Option<&ToolResult> {
        self.tools.get(tool)
    }

    /// Number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the document has no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of tools that reported a failure.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.tools.values().filter(|r| r.is_error()).count()
    }

    /// Typed view of the `file_info` tool, when present and successful.
    #[must_use]
    pub fn file_info(&self) -> Option<FileInfo> {
        self.get(FILE_INFO_TOOL)
            .and_then(ToolResult::as_node)
            .map(FileInfo::from_node)
    }

    /// Convert back to the service's JSON shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.tools
                .iter()
                .map(|(tool, result)| (tool.clone(), result.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, ToolResult)> for MetadataDocument {
    fn from_iter<I: IntoIterator<Item = (String, ToolResult)>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().collect(),
        }
    }
}

impl Serialize for MetadataDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MetadataDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_member_marks_failure() {
        let doc = MetadataDocument::from_value(json!({"exif": {"error": "no data"}})).unwrap();
        assert_eq!(doc.get("exif"), Some(&ToolResult::Error("no data".to_string())));
        assert_eq!(doc.error_count(), 1);
    }

    #[test]
    fn test_falsy_error_member_is_metadata() {
        let doc = MetadataDocument::from_value(json!({"exif": {"error": "", "Make": "Canon"}})).unwrap();
        let node = doc.get("exif").and_then(ToolResult::as_node).unwrap();
        assert_eq!(node.len(), 2);
    }

    #[test]
    fn test_non_string_error_message() {
        let doc = MetadataDocument::from_value(json!({"hachoir": {"error": 127}})).unwrap();
        assert_eq!(doc.get("hachoir"), Some(&ToolResult::Error("127".to_string())));
    }

    #[test]
    fn test_tool_order_preserved() {
        let doc = MetadataDocument::from_json_str(
            r#"{"strings": {}, "file_info": {"name": "a"}, "exiftool": {"Make": "X"}}"#,
        )
        .unwrap();
        let names: Vec<&str> = doc.tools().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["strings", "file_info", "exiftool"]);
    }

    #[test]
    fn test_scalar_tools_are_dropped() {
        let doc = MetadataDocument::from_value(json!({"a": null, "b": 5, "c": {"k": 1}})).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.get("c").is_some());
    }

    #[test]
    fn test_array_tool_is_indexed_node() {
        let doc = MetadataDocument::from_value(json!({"lines": ["x", "y"]})).unwrap();
        let node = doc.get("lines").and_then(ToolResult::as_node).unwrap();
        assert_eq!(node.get("1"), Some(&MetadataValue::from("y")));
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = MetadataDocument::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, MetaviewError::InvalidDocument { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_serde_round_trip() {
        let json = r#"{"exif":{"error":"boom"},"file":{"mime_type":"image/png"}}"#;
        let doc: MetadataDocument = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), json);
    }
}
