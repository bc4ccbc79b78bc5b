//! Export of flattened metadata to output formats.
//!
//! This module provides:
//! - Text: grouped `label: value` listing for terminals
//! - JSON: structured sections and rows
//! - CSV: one line per row, spreadsheet-compatible
//! - HTML: standalone page with optional live search
//!
//! Every exporter takes the same [`ExportOptions`], so a search query or
//! truncation limit behaves identically across formats.

mod csv;
mod html;
mod json;
mod text;

pub use csv::*;
pub use html::*;
pub use json::*;
pub use text::*;

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use crate::error::{MetaviewError, Result};
use crate::model::{FileInfo, FlatRow, ToolSection};
use crate::search::{filter_sections, FilteredSection};
use crate::util::{atomic_write, truncate_display};

/// Common export options shared across formats.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Only rows matching this query (see [`crate::search::is_visible`]).
    pub query: Option<String>,
    /// Truncate long values at this many characters (text and HTML only).
    pub truncate_at: Option<usize>,
    /// Include sections for failed tools.
    pub include_errors: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            query: None,
            truncate_at: None,
            include_errors: true,
        }
    }
}

impl ExportOptions {
    /// Builder: filter rows by query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Builder: truncate long values.
    #[must_use]
    pub fn with_truncate_at(mut self, limit: Option<usize>) -> Self {
        self.truncate_at = limit.filter(|&n| n > 0);
        self
    }

    /// Builder: include failed tools.
    #[must_use]
    pub fn with_errors(mut self, include: bool) -> Self {
        self.include_errors = include;
        self
    }

    /// Apply query and error filtering to `sections`.
    #[must_use]
    pub fn select<'a>(&self, sections: &'a [ToolSection]) -> Vec<FilteredSection<'a>> {
        filter_sections(sections, self.query.as_deref().unwrap_or(""))
            .into_iter()
            .filter(|section| self.include_errors || !section.rows.iter().all(|r| r.is_error))
            .collect()
    }

    /// Row value as it should be displayed, honouring `truncate_at`.
    #[must_use]
    pub fn display_value<'a>(&self, row: &'a FlatRow) -> Cow<'a, str> {
        match self.truncate_at {
            Some(limit) => truncate_display(&row.value, limit),
            None => Cow::Borrowed(&row.value),
        }
    }
}

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Grouped plain text.
    Text,
    /// Compact JSON.
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
    /// CSV tabular data.
    Csv,
    /// Standalone HTML page.
    Html,
}

impl ExportFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json | Self::JsonPretty => "json",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }

    /// Parse format from string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "json-pretty" | "jsonpretty" => Some(Self::JsonPretty),
            "csv" => Some(Self::Csv),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export flattened sections to the writer.
    fn export_sections<W: Write>(
        &self,
        sections: &[ToolSection],
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()>;
}

/// Export sections to a string in the given format.
pub fn export_to_string(
    sections: &[ToolSection],
    file_info: Option<&FileInfo>,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String> {
    let mut buffer = Vec::new();

    match format {
        ExportFormat::Text => {
            let exporter = TextExporter::new().with_file_info(file_info.cloned());
            exporter.export_sections(sections, &mut buffer, options)?;
        }
        ExportFormat::Json => {
            let exporter = JsonExporter::new()
                .with_envelope(file_info.is_some())
                .with_file_info(file_info.cloned());
            exporter.export_sections(sections, &mut buffer, options)?;
        }
        ExportFormat::JsonPretty => {
            let exporter = JsonExporter::new()
                .pretty(true)
                .with_envelope(file_info.is_some())
                .with_file_info(file_info.cloned());
            exporter.export_sections(sections, &mut buffer, options)?;
        }
        ExportFormat::Csv => {
            let exporter = CsvExporter::new();
            exporter.export_sections(sections, &mut buffer, options)?;
        }
        ExportFormat::Html => {
            let exporter = HtmlExporter::new().with_file_info(file_info.cloned());
            exporter.export_sections(sections, &mut buffer, options)?;
        }
    }

    String::from_utf8(buffer).map_err(|e| MetaviewError::InvalidDocument {
        message: format!("Export produced invalid UTF-8: {e}"),
    })
}

/// Export sections to a file.
///
/// The output is rendered in memory and written atomically, so a failed
/// export never leaves a partial file behind.
pub fn export_to_file(
    sections: &[ToolSection],
    file_info: Option<&FileInfo>,
    path: impl AsRef<Path>,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<()> {
    let content = export_to_string(sections, file_info, format, options)?;
    atomic_write(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<ToolSection> {
        vec![
            ToolSection {
                tool: "exif".to_string(),
                rows: vec![
                    FlatRow::new("exif", "Make", "Make", "Canon"),
                    FlatRow::new("exif", "Comment", "Comment", "a very long comment"),
                ],
            },
            ToolSection {
                tool: "ffprobe".to_string(),
                rows: vec![FlatRow::error("ffprobe", "ffprobe not installed")],
            },
        ]
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!(ExportFormat::from_str("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_str("htm"), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::from_str("xml"), None);
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_select_applies_query_and_errors() {
        let all = sections();

        let opts = ExportOptions::default().with_query("canon");
        let selected = opts.select(&all);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].rows.len(), 1);

        let opts = ExportOptions::default().with_errors(false);
        assert_eq!(opts.select(&all).len(), 1);

        let opts = ExportOptions::default().with_query("");
        assert!(opts.query.is_none());
        assert_eq!(opts.select(&all).len(), 2);
    }

    #[test]
    fn test_display_value_truncates() {
        let all = sections();
        let opts = ExportOptions::default().with_truncate_at(Some(6));
        assert_eq!(opts.display_value(&all[0].rows[1]), "a very…");

        let opts = ExportOptions::default().with_truncate_at(Some(0));
        assert!(opts.truncate_at.is_none());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export_to_file(&sections(), None, &path, ExportFormat::Csv, &ExportOptions::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("tool,key_path,label,value,is_error\n"));
    }
}
