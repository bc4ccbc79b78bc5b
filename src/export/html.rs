//! HTML export of flattened metadata.
//!
//! Produces a standalone page: one `metadata-tool-section` per tool with an
//! upper-cased `<h3>` heading, then one `metadata-item` per row. All text
//! from the document passes through [`escape_markup`] before it is written.
//! An optional search box filters rows in the browser with the same rule
//! as [`crate::search::is_visible`]. Each item carries its full value in a
//! `data-value` attribute, so truncated values still match.

use std::io::Write;

use crate::error::Result;
use crate::model::{FileInfo, ToolSection};
use crate::render::escape_markup;

use super::text::EMPTY_MESSAGE;
use super::{ExportOptions, Exporter};

/// HTML exporter.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    /// Document title.
    title: String,
    /// Use dark theme.
    dark_theme: bool,
    /// Embed a live search box.
    include_search: bool,
    /// File information shown above the sections.
    file_info: Option<FileInfo>,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlExporter {
    /// Create a new HTML exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "File Metadata".to_string(),
            dark_theme: false,
            include_search: true,
            file_info: None,
        }
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use dark theme.
    #[must_use]
    pub fn dark_theme(mut self, dark: bool) -> Self {
        self.dark_theme = dark;
        self
    }

    /// Embed the search box and its script.
    #[must_use]
    pub fn with_search(mut self, include: bool) -> Self {
        self.include_search = include;
        self
    }

    /// Show a file information block.
    #[must_use]
    pub fn with_file_info(mut self, file_info: Option<FileInfo>) -> Self {
        self.file_info = file_info;
        self
    }

    fn write_document_start<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "  <meta charset=\"UTF-8\">")?;
        writeln!(
            writer,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(writer, "  <title>{}</title>", escape_markup(&self.title))?;
        self.write_styles(writer)?;
        writeln!(writer, "</head>")?;

        let body_class = if self.dark_theme { " class=\"dark\"" } else { "" };
        writeln!(writer, "<body{body_class}>")?;
        writeln!(writer, "<main class=\"metadata\">")?;
        writeln!(writer, "<h1>{}</h1>", escape_markup(&self.title))?;
        Ok(())
    }

    fn write_styles<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "  <style>")?;
        writeln!(
            writer,
            r#"
    :root {{
      --bg-color: #ffffff;
      --text-color: #1a1a1a;
      --section-bg: #f8f9fa;
      --border-color: #dee2e6;
      --key-color: #495057;
      --error-color: #c0392b;
      --accent-color: #0066cc;
    }}

    .dark {{
      --bg-color: #1a1a1a;
      --text-color: #e0e0e0;
      --section-bg: #252525;
      --border-color: #404040;
      --key-color: #adb5bd;
      --error-color: #ff6b6b;
      --accent-color: #4da6ff;
    }}

    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: var(--bg-color);
      color: var(--text-color);
      margin: 0;
      padding: 2rem;
    }}

    .metadata {{
      max-width: 960px;
      margin: 0 auto;
    }}

    .file-info {{
      border-left: 3px solid var(--accent-color);
      padding: 0.5rem 1rem;
      margin-bottom: 1.5rem;
    }}

    .search-box {{
      width: 100%;
      padding: 0.5rem;
      margin-bottom: 1.5rem;
      border: 1px solid var(--border-color);
      border-radius: 4px;
    }}

    .metadata-tool-section {{
      background: var(--section-bg);
      border: 1px solid var(--border-color);
      border-radius: 6px;
      padding: 0.75rem 1rem;
      margin-bottom: 1rem;
    }}

    .metadata-tool-section h3 {{
      margin: 0 0 0.5rem 0;
      color: var(--accent-color);
    }}

    .metadata-item {{
      display: flex;
      gap: 1rem;
      padding: 0.25rem 0;
      border-bottom: 1px solid var(--border-color);
    }}

    .metadata-key {{
      flex: 0 0 30%;
      font-weight: 600;
      color: var(--key-color);
    }}

    .metadata-value {{
      flex: 1;
      white-space: pre-wrap;
      word-break: break-word;
    }}

    .metadata-value.error {{
      color: var(--error-color);
    }}

    .empty {{
      font-style: italic;
    }}
"#
        )?;
        writeln!(writer, "  </style>")?;
        Ok(())
    }

    fn write_file_info<W: Write>(&self, writer: &mut W, info: &FileInfo) -> Result<()> {
        writeln!(writer, "<section class=\"file-info\">")?;
        writeln!(writer, "  <div><strong>File:</strong> {}</div>", escape_markup(info.display_name()))?;
        writeln!(writer, "  <div><strong>Type:</strong> {}</div>", escape_markup(info.display_type()))?;
        writeln!(writer, "  <div><strong>Size:</strong> {}</div>", escape_markup(&info.display_size()))?;
        if let Some(modified) = info.display_modified() {
            writeln!(writer, "  <div><strong>Modified:</strong> {}</div>", escape_markup(&modified))?;
        }
        writeln!(writer, "</section>")?;
        Ok(())
    }

    fn write_document_end<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "</main>")?;
        if self.include_search {
            writeln!(writer, "<script>")?;
            writeln!(
                writer,
                r#"
    (function() {{
      const input = document.getElementById('metadata-search');
      if (!input) return;
      input.addEventListener('input', function() {{
        const query = input.value.toLowerCase();
        document.querySelectorAll('.metadata-tool-section').forEach(function(section) {{
          let visible = 0;
          section.querySelectorAll('.metadata-item').forEach(function(item) {{
            const key = item.querySelector('.metadata-key').textContent.toLowerCase();
            const value = (item.dataset.value || '').toLowerCase();
            const show = key.includes(query) || value.includes(query);
            item.style.display = show ? '' : 'none';
            if (show) visible++;
          }});
          section.style.display = visible > 0 ? '' : 'none';
        }});
      }});
    }})();
"#
            )?;
            writeln!(writer, "</script>")?;
        }
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        Ok(())
    }
}

impl Exporter for HtmlExporter {
    fn export_sections<W: Write>(
        &self,
        sections: &[ToolSection],
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        self.write_document_start(writer)?;

        if let Some(info) = &self.file_info {
            self.write_file_info(writer, info)?;
        }

        if self.include_search {
            let initial = options.query.as_deref().unwrap_or("");
            writeln!(
                writer,
                "<input type=\"search\" id=\"metadata-search\" class=\"search-box\" placeholder=\"Search metadata...\" value=\"{}\">",
                escape_markup(initial)
            )?;
        }

        let selected = options.select(sections);
        if selected.is_empty() {
            writeln!(writer, "<p class=\"empty\">{EMPTY_MESSAGE}</p>")?;
        }

        for section in &selected {
            writeln!(writer, "<section class=\"metadata-tool-section\">")?;
            writeln!(writer, "  <h3>{}</h3>", escape_markup(&section.tool.to_uppercase()))?;
            for row in &section.rows {
                let value_class = if row.is_error {
                    "metadata-value error"
                } else {
                    "metadata-value"
                };
                if self.include_search {
                    writeln!(
                        writer,
                        "  <div class=\"metadata-item\" data-value=\"{}\">",
                        escape_markup(&row.value)
                    )?;
                } else {
                    writeln!(writer, "  <div class=\"metadata-item\">")?;
                }
                writeln!(
                    writer,
                    "    <span class=\"metadata-key\">{}</span>",
                    escape_markup(&row.label)
                )?;
                writeln!(
                    writer,
                    "    <span class=\"{value_class}\">{}</span>",
                    escape_markup(&options.display_value(row))
                )?;
                writeln!(writer, "  </div>")?;
            }
            writeln!(writer, "</section>")?;
        }

        self.write_document_end(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlatRow;

    fn export(exporter: &HtmlExporter, sections: &[ToolSection]) -> String {
        let mut out = Vec::new();
        exporter
            .export_sections(sections, &mut out, &ExportOptions::default())
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_values_are_escaped() {
        let sections = vec![ToolSection {
            tool: "exiftool".to_string(),
            rows: vec![FlatRow::new(
                "exiftool",
                "Comment",
                "Comment",
                "<script>alert(1)</script>",
            )],
        }];
        let html = export(&HtmlExporter::new().with_search(false), &sections);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<h3>EXIFTOOL</h3>"));
        assert!(html.contains("<span class=\"metadata-key\">Comment</span>"));
    }

    #[test]
    fn test_error_row_class() {
        let sections = vec![ToolSection {
            tool: "ffprobe".to_string(),
            rows: vec![FlatRow::error("ffprobe", "not installed")],
        }];
        let html = export(&HtmlExporter::new(), &sections);

        assert!(html.contains("<span class=\"metadata-value error\">not installed</span>"));
        assert!(html.contains("id=\"metadata-search\""));
    }

    #[test]
    fn test_search_sees_untruncated_value() {
        let sections = vec![ToolSection {
            tool: "exiftool".to_string(),
            rows: vec![FlatRow::new("exiftool", "Comment", "Comment", "aaaaaaaaaaNEEDLE")],
        }];
        let options = ExportOptions::default().with_truncate_at(Some(5));
        let mut out = Vec::new();
        HtmlExporter::new()
            .export_sections(&sections, &mut out, &options)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(crate::search::is_visible(&sections[0].rows[0], "needle"));
        assert!(html.contains("<span class=\"metadata-value\">aaaaa…</span>"));
        assert!(html.contains("data-value=\"aaaaaaaaaaNEEDLE\""));
        assert!(html.contains("item.dataset.value"));
    }

    #[test]
    fn test_no_data_value_without_search() {
        let sections = vec![ToolSection {
            tool: "exiftool".to_string(),
            rows: vec![FlatRow::new("exiftool", "Make", "Make", "Canon")],
        }];
        let html = export(&HtmlExporter::new().with_search(false), &sections);
        assert!(html.contains("<div class=\"metadata-item\">"));
        assert!(!html.contains("data-value"));
    }

    #[test]
    fn test_empty_document() {
        let html = export(&HtmlExporter::new().with_title("A & B").dark_theme(true), &[]);
        assert!(html.contains("<p class=\"empty\">No metadata found</p>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<body class=\"dark\">"));
    }
}
