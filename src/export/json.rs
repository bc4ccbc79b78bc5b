//! JSON export of flattened metadata.
//!
//! Output is an array of `{tool, rows}` sections. Optionally the array is
//! wrapped in an envelope carrying the crate version, the file information
//! and the row count. Values are never truncated.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::{FileInfo, ToolSection};
use crate::search::FilteredSection;

use super::{ExportOptions, Exporter};

/// JSON exporter.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    /// Pretty-print the JSON output.
    pretty: bool,
    /// Wrap sections in an envelope with metadata.
    use_envelope: bool,
    /// File information for the envelope.
    file_info: Option<FileInfo>,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonExporter {
    /// Create a new JSON exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            use_envelope: false,
            file_info: None,
        }
    }

    /// Enable pretty-printing.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Use envelope format.
    #[must_use]
    pub fn with_envelope(mut self, use_envelope: bool) -> Self {
        self.use_envelope = use_envelope;
        self
    }

    /// Attach file information to the envelope.
    #[must_use]
    pub fn with_file_info(mut self, file_info: Option<FileInfo>) -> Self {
        self.file_info = file_info;
        self
    }

    fn write_value<W: Write, T: Serialize>(&self, writer: &mut W, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/// Envelope around exported sections.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_info: Option<&'a FileInfo>,
    row_count: usize,
    sections: &'a [FilteredSection<'a>],
}

impl Exporter for JsonExporter {
    fn export_sections<W: Write>(
        &self,
        sections: &[ToolSection],
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        let selected = options.select(sections);

        if self.use_envelope {
            let envelope = Envelope {
                version: crate::VERSION,
                query: options.query.as_deref(),
                file_info: self.file_info.as_ref(),
                row_count: selected.iter().map(|s| s.rows.len()).sum(),
                sections: &selected,
            };
            self.write_value(writer, &envelope)
        } else {
            self.write_value(writer, &selected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlatRow;
    use serde_json::{json, Value};

    fn export(exporter: &JsonExporter, options: &ExportOptions) -> Value {
        let sections = vec![ToolSection {
            tool: "exiftool".to_string(),
            rows: vec![
                FlatRow::new("exiftool", "Make", "Make", "Canon"),
                FlatRow::new("exiftool", "Model", "Model", "EOS"),
            ],
        }];
        let mut out = Vec::new();
        exporter.export_sections(&sections, &mut out, options).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_envelope() {
        let value = export(
            &JsonExporter::new().with_envelope(true),
            &ExportOptions::default().with_query("eos"),
        );
        assert_eq!(value["version"], crate::VERSION);
        assert_eq!(value["query"], "eos");
        assert_eq!(value["row_count"], 1);
        assert!(value.get("file_info").is_none());
        assert_eq!(
            value["sections"][0],
            json!({
                "tool": "exiftool",
                "rows": [{
                    "tool": "exiftool",
                    "key_path": "Model",
                    "label": "Model",
                    "value": "EOS",
                    "is_error": false
                }]
            })
        );
    }

    #[test]
    fn test_bare_sections() {
        let value = export(
            &JsonExporter::new().pretty(true),
            &ExportOptions::default(),
        );
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["rows"][0]["value"], "Canon");
    }
}
