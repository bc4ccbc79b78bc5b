//! CSV export for flattened metadata.
//!
//! One line per row with the columns `tool,key_path,label,value,is_error`.
//! Values are never truncated; multi-line values are quoted.

use std::io::Write;

use crate::error::Result;
use crate::model::ToolSection;

use super::{ExportOptions, Exporter};

const HEADER: [&str; 5] = ["tool", "key_path", "label", "value", "is_error"];

/// CSV exporter for metadata rows.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    /// Include header row.
    include_header: bool,
    /// Field delimiter.
    delimiter: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// Create a new CSV exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_header: true,
            delimiter: ',',
        }
    }

    /// Include or exclude header row.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn escape_field(&self, value: &str) -> String {
        let needs_quoting = value.contains(self.delimiter)
            || value.contains('"')
            || value.contains('\n')
            || value.contains('\r');

        if needs_quoting {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn write_row<W: Write>(&self, writer: &mut W, fields: &[&str]) -> Result<()> {
        let line: Vec<String> = fields.iter().map(|f| self.escape_field(f)).collect();
        writeln!(writer, "{}", line.join(&self.delimiter.to_string()))?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export_sections<W: Write>(
        &self,
        sections: &[ToolSection],
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        if self.include_header {
            self.write_row(writer, &HEADER)?;
        }

        for section in options.select(sections) {
            for row in section.rows {
                let is_error = if row.is_error { "true" } else { "false" };
                self.write_row(
                    writer,
                    &[
                        row.tool.as_str(),
                        row.key_path.as_str(),
                        row.label.as_str(),
                        row.value.as_str(),
                        is_error,
                    ],
                )?;
            }
        }

        Ok(())
    }
}
