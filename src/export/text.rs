//! Plain text export for terminals and pipes.
//!
//! Sections are headed by the upper-cased tool name and list one
//! `Label: value` line per row. Multi-line values continue on indented
//! lines; failed tools are shown as `! message`.

use std::io::Write;

use crate::error::Result;
use crate::model::{FileInfo, ToolSection};

use super::{ExportOptions, Exporter};

/// Message printed when nothing is left to show.
pub const EMPTY_MESSAGE: &str = "No metadata found";

const ROW_INDENT: &str = "  ";

/// Plain text exporter.
#[derive(Debug, Clone)]
pub struct TextExporter {
    /// File information printed above the sections.
    file_info: Option<FileInfo>,
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExporter {
    /// Create a new text exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_info: None,
        }
    }

    /// Print a file information header.
    #[must_use]
    pub fn with_file_info(mut self, file_info: Option<FileInfo>) -> Self {
        self.file_info = file_info;
        self
    }

    fn write_file_info<W: Write>(&self, writer: &mut W, info: &FileInfo) -> Result<()> {
        writeln!(writer, "File: {}", info.display_name())?;
        writeln!(writer, "Type: {}", info.display_type())?;
        writeln!(writer, "Size: {}", info.display_size())?;
        if let Some(modified) = info.display_modified() {
            writeln!(writer, "Modified: {modified}")?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Exporter for TextExporter {
    fn export_sections<W: Write>(
        &self,
        sections: &[ToolSection],
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        if let Some(info) = &self.file_info {
            self.write_file_info(writer, info)?;
        }

        let selected = options.select(sections);
        if selected.is_empty() {
            writeln!(writer, "{EMPTY_MESSAGE}")?;
            return Ok(());
        }

        for (i, section) in selected.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            writeln!(writer, "{}", section.tool.to_uppercase())?;

            for row in &section.rows {
                let value = options.display_value(row);
                if row.is_error {
                    writeln!(writer, "{ROW_INDENT}! {value}")?;
                    continue;
                }

                let mut lines = value.lines();
                writeln!(writer, "{ROW_INDENT}{}: {}", row.label, lines.next().unwrap_or(""))?;
                for line in lines {
                    writeln!(writer, "{ROW_INDENT}{ROW_INDENT}{line}")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlatRow;
    use pretty_assertions::assert_eq;

    fn export(exporter: &TextExporter, sections: &[ToolSection], options: &ExportOptions) -> String {
        let mut out = Vec::new();
        exporter.export_sections(sections, &mut out, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Vec<ToolSection> {
        vec![
            ToolSection {
                tool: "exiftool".to_string(),
                rows: vec![
                    FlatRow::new("exiftool", "Make", "Make", "Canon"),
                    FlatRow::new("exiftool", "Keywords", "Keywords", "[\n  \"a\"\n]"),
                ],
            },
            ToolSection {
                tool: "ffprobe".to_string(),
                rows: vec![FlatRow::error("ffprobe", "ffprobe not installed")],
            },
        ]
    }

    #[test]
    fn test_grouped_output() {
        let text = export(&TextExporter::new(), &sample(), &ExportOptions::default());
        assert_eq!(
            text,
            "EXIFTOOL\n  Make: Canon\n  Keywords: [\n      \"a\"\n    ]\n\nFFPROBE\n  ! ffprobe not installed\n"
        );
    }

    #[test]
    fn test_no_matches() {
        let options = ExportOptions::default().with_query("nikon");
        assert_eq!(export(&TextExporter::new(), &sample(), &options), "No metadata found\n");
    }

    #[test]
    fn test_file_info_header() {
        let info = FileInfo {
            name: Some("photo.jpg".to_string()),
            mime_type: Some("image/jpeg".to_string()),
            size: Some(1536),
            ..FileInfo::default()
        };
        let exporter = TextExporter::new().with_file_info(Some(info));
        let text = export(&exporter, &[], &ExportOptions::default());
        assert_eq!(text, "File: photo.jpg\nType: image/jpeg\nSize: 1.50 KB\n\nNo metadata found\n");
    }
}
