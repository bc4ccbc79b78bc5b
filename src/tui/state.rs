//! TUI application state.

use crate::error::{MetaviewError, Result};
use crate::model::{FileInfo, ToolSection};
use crate::search::{count_visible, filter_sections};

use super::theme::{available_themes, Theme};

/// One display line of the metadata list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    /// Tool section heading.
    Heading(String),
    /// First line of a row.
    Row {
        /// Human-readable key.
        label: String,
        /// First line of the rendered value.
        value: String,
        /// Row carries a tool failure.
        is_error: bool,
    },
    /// Further lines of a multi-line value.
    Continuation {
        /// Line text.
        text: String,
        /// Row carries a tool failure.
        is_error: bool,
    },
    /// Spacer between sections.
    Blank,
    /// Placeholder when nothing is visible.
    Empty(String),
}

/// Viewer state for one metadata document.
#[derive(Debug, Clone)]
pub struct ViewerState {
    /// Flattened sections of the document.
    pub sections: Vec<ToolSection>,
    /// Descriptive file information, if the document carried any.
    pub file_info: Option<FileInfo>,
    /// Where the document came from (path or file id).
    pub source: String,
    /// Current search query.
    pub query: String,
    /// Typing into the search bar.
    pub searching: bool,
    /// First visible line of the list.
    pub scroll_offset: usize,
    /// Height of the list viewport from the last draw.
    pub viewport: usize,
    /// Show help overlay.
    pub show_help: bool,
    /// Current theme.
    pub theme: Theme,
    /// Transient message for the status bar.
    pub status_message: Option<String>,
}

impl ViewerState {
    /// Create state for a set of sections.
    pub fn new(sections: Vec<ToolSection>, file_info: Option<FileInfo>, source: impl Into<String>) -> Self {
        Self {
            sections,
            file_info,
            source: source.into(),
            query: String::new(),
            searching: false,
            scroll_offset: 0,
            viewport: 20,
            show_help: false,
            theme: Theme::default(),
            status_message: None,
        }
    }

    /// Use the named theme.
    pub fn with_theme(mut self, name: &str) -> Result<Self> {
        self.theme = Theme::from_name(name).ok_or_else(|| MetaviewError::InvalidArgument {
            name: "theme".to_string(),
            reason: format!(
                "unknown theme '{name}' (available: default, {})",
                available_themes().join(", ")
            ),
        })?;
        Ok(self)
    }

    /// Lines currently visible for the query.
    pub fn lines(&self) -> Vec<ViewLine> {
        let visible = filter_sections(&self.sections, &self.query);
        if visible.is_empty() {
            let message = if self.query.is_empty() {
                "No metadata found".to_string()
            } else {
                format!("No rows match '{}'", self.query)
            };
            return vec![ViewLine::Empty(message)];
        }

        let mut lines = Vec::new();
        for (index, section) in visible.iter().enumerate() {
            if index > 0 {
                lines.push(ViewLine::Blank);
            }
            lines.push(ViewLine::Heading(section.tool.to_uppercase()));
            for row in &section.rows {
                let mut parts = row.value.lines();
                lines.push(ViewLine::Row {
                    label: row.label.clone(),
                    value: parts.next().unwrap_or_default().to_string(),
                    is_error: row.is_error,
                });
                lines.extend(parts.map(|text| ViewLine::Continuation {
                    text: text.to_string(),
                    is_error: row.is_error,
                }));
            }
        }
        lines
    }

    /// Number of rows matching the query.
    pub fn visible_rows(&self) -> usize {
        count_visible(&self.sections, &self.query)
    }

    /// Number of rows in the document.
    pub fn total_rows(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(self.viewport.max(1))
    }

    /// Scroll down by `n` lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = (self.scroll_offset + n).min(self.max_scroll());
    }

    /// Scroll up by `n` lines.
    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Scroll down one page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.max(1));
    }

    /// Scroll up one page.
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.max(1));
    }

    /// Jump to the first line.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Jump to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Record the list height and keep the offset in range.
    pub fn set_viewport(&mut self, height: usize) {
        self.viewport = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Start search mode.
    pub fn start_search(&mut self) {
        self.searching = true;
    }

    /// Leave search mode, keeping the query.
    pub fn confirm_search(&mut self) {
        self.searching = false;
    }

    /// Leave search mode and clear the query.
    pub fn clear_search(&mut self) {
        self.searching = false;
        self.query.clear();
        self.scroll_offset = 0;
    }

    /// Append a character to the query.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.scroll_offset = 0;
    }

    /// Remove the last character of the query.
    pub fn pop_char(&mut self) {
        self.query.pop();
        self.scroll_offset = 0;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status_message = Some(format!("Theme: {}", self.theme.name));
    }
}
