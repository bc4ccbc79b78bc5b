//! Basic file information reported alongside tool metadata.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::value::{MetadataNode, MetadataValue};

/// Typed view over the `file_info` tool entry.
///
/// Every field is optional; the service may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Stored file name (includes the upload timestamp prefix).
    #[serde(default)]
    pub name: Option<String>,
    /// Lower-cased extension including the dot.
    #[serde(default)]
    pub extension: Option<String>,
    /// Guessed MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Human-readable size as formatted by the service.
    #[serde(default)]
    pub size_formatted: Option<String>,
    /// Creation timestamp (ISO-8601).
    #[serde(default)]
    pub created: Option<String>,
    /// Modification timestamp (ISO-8601).
    #[serde(default)]
    pub modified: Option<String>,
    /// Access timestamp (ISO-8601).
    #[serde(default)]
    pub accessed: Option<String>,
}

impl FileInfo {
    /// Build from a tool node, ignoring members of unexpected type.
    ///
    /// Each member is read on its own, so one bad member never hides the rest.
    /// A float `size` is accepted when it is finite and non-negative.
    #[must_use]
    pub fn from_node(node: &MetadataNode) -> Self {
        let text = |key: &str| node.get(key).and_then(MetadataValue::as_str).map(str::to_string);
        let size = match node.get("size") {
            Some(MetadataValue::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            _ => None,
        };

        Self {
            name: text("name"),
            extension: text("extension"),
            mime_type: text("mime_type"),
            size,
            size_formatted: text("size_formatted"),
            created: text("created"),
            modified: text("modified"),
            accessed: text("accessed"),
        }
    }

    /// Display name, falling back to a placeholder.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }

    /// Display MIME type, falling back to `unknown` like the service does.
    #[must_use]
    pub fn display_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or("unknown")
    }

    /// Size for display: the service's formatting when present, else computed.
    #[must_use]
    pub fn display_size(&self) -> String {
        match (&self.size_formatted, self.size) {
            (Some(formatted), _) => formatted.clone(),
            (None, Some(bytes)) => crate::util::format_size(bytes),
            (None, None) => "unknown".to_string(),
        }
    }

    /// Modification time as `YYYY-MM-DD HH:MM:SS`, or the raw text if unparseable.
    #[must_use]
    pub fn display_modified(&self) -> Option<String> {
        self.modified.as_deref().map(format_timestamp)
    }
}

/// Normalize an ISO-8601 timestamp for display.
fn format_timestamp(raw: &str) -> String {
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return naive.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> MetadataNode {
        match MetadataValue::from(value) {
            MetadataValue::Node(node) => node,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_node() {
        let info = FileInfo::from_node(&node(json!({
            "name": "20250101_120000_photo.jpg",
            "extension": ".jpg",
            "mime_type": "image/jpeg",
            "size": 2048,
            "size_formatted": "2.00 KB",
            "modified": "2025-01-01T12:00:00.123456"
        })));

        assert_eq!(info.display_name(), "20250101_120000_photo.jpg");
        assert_eq!(info.display_type(), "image/jpeg");
        assert_eq!(info.display_size(), "2.00 KB");
        assert_eq!(info.display_modified().as_deref(), Some("2025-01-01 12:00:00"));
    }

    #[test]
    fn test_bad_member_keeps_the_rest() {
        let info = FileInfo::from_node(&node(json!({
            "name": "clip.mp4",
            "mime_type": 42,
            "size": 1536.0,
            "modified": null
        })));

        assert_eq!(info.display_name(), "clip.mp4");
        assert_eq!(info.mime_type, None);
        assert_eq!(info.size, Some(1536));
        assert_eq!(info.display_size(), "1.50 KB");
        assert_eq!(info.modified, None);

        let negative = FileInfo::from_node(&node(json!({"size": -1.5})));
        assert_eq!(negative.size, None);
    }

    #[test]
    fn test_size_fallback() {
        let info = FileInfo {
            size: Some(1536),
            ..FileInfo::default()
        };
        assert_eq!(info.display_size(), "1.50 KB");
        assert_eq!(FileInfo::default().display_size(), "unknown");
    }

    #[test]
    fn test_unparseable_timestamp_passes_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp("2025-03-04T05:06:07+02:00"), "2025-03-04 05:06:07");
    }
}
