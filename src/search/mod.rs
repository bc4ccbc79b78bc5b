//! Live search over rendered metadata rows.
//!
//! Filtering is a view operation: it never touches the document, keeps no
//! state between calls, and is cheap enough to run on every keystroke.

use serde::Serialize;

use crate::model::{FlatRow, ToolSection};

/// Whether `row` matches `query`.
///
/// Case-insensitive substring match against the row's label and value. An
/// empty query matches every row.
#[must_use]
pub fn is_visible(row: &FlatRow, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    row.label.to_lowercase().contains(&needle) || row.value.to_lowercase().contains(&needle)
}

/// Sections narrowed to the rows matching `query`.
///
/// Sections left with no matching rows are dropped. Row and section order are
/// unchanged.
#[must_use]
pub fn filter_sections<'a>(sections: &'a [ToolSection], query: &str) -> Vec<FilteredSection<'a>> {
    sections
        .iter()
        .filter_map(|section| {
            let rows: Vec<&FlatRow> = section.rows.iter().filter(|row| is_visible(row, query)).collect();
            if rows.is_empty() {
                None
            } else {
                Some(FilteredSection {
                    tool: &section.tool,
                    rows,
                })
            }
        })
        .collect()
}

/// Count of rows matching `query` across all sections.
#[must_use]
pub fn count_visible(sections: &[ToolSection], query: &str) -> usize {
    sections
        .iter()
        .flat_map(|s| &s.rows)
        .filter(|row| is_visible(row, query))
        .count()
}

/// A borrowed view of a section after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredSection<'a> {
    /// Tool name.
    pub tool: &'a str,
    /// Matching rows, in their original order.
    pub rows: Vec<&'a FlatRow>,
}
