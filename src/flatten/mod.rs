//! Flattening of multi-tool metadata documents into display rows.
//!
//! The flattener walks every tool in document order. Failed tools produce a
//! single error row. Successful tools are walked depth-first: nested nodes
//! contribute only their descendants, with the key path extended by `_` at
//! each level, while every other value becomes one row labelled from its leaf
//! key. Null values are skipped, and a tool that ends up with no rows is left
//! out entirely.

use tracing::{debug, trace};

use crate::model::{FlatRow, MetadataDocument, MetadataNode, MetadataValue, ToolResult, ToolSection};
use crate::render::{format_key, render_value};

/// Separator between key path segments.
pub const KEY_PATH_SEPARATOR: char = '_';

/// Counters gathered while flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Tools present in the document.
    pub tools_seen: usize,
    /// Sections emitted.
    pub sections: usize,
    /// Metadata rows emitted (error rows excluded).
    pub rows: usize,
    /// Tool failures emitted as error rows.
    pub errors: usize,
    /// Null values skipped.
    pub skipped: usize,
    /// Tools omitted because they produced no rows.
    pub empty_tools: usize,
    /// Deepest nesting level encountered (tool root is 1).
    pub max_depth: usize,
}

/// Flatten a document into ordered tool sections.
///
/// Pure and deterministic: the same document always yields the same output.
#[must_use]
pub fn flatten(doc: &MetadataDocument) -> Vec<ToolSection> {
    flatten_with_stats(doc).0
}

/// Flatten a document and report what was emitted and skipped.
#[must_use]
pub fn flatten_with_stats(doc: &MetadataDocument) -> (Vec<ToolSection>, FlattenStats) {
    let mut stats = FlattenStats::default();
    let mut sections = Vec::with_capacity(doc.len());

    for (tool, result) in doc.tools() {
        stats.tools_seen += 1;

        let rows = match result {
            ToolResult::Error(message) => {
                stats.errors += 1;
                vec![FlatRow::error(tool, message.as_str())]
            }
            ToolResult::Node(node) => {
                let mut rows = Vec::with_capacity(node.len());
                let mut walker = Walker {
                    tool,
                    rows: &mut rows,
                    stats: &mut stats,
                };
                walker.walk(node, None, 1);
                rows
            }
        };

        if rows.is_empty() {
            trace!(tool, "Omitting tool without rows");
            stats.empty_tools += 1;
            continue;
        }

        sections.push(ToolSection {
            tool: tool.to_string(),
            rows,
        });
    }

    stats.sections = sections.len();
    debug!(
        tools = stats.tools_seen,
        sections = stats.sections,
        rows = stats.rows,
        errors = stats.errors,
        skipped = stats.skipped,
        "Flattened metadata document"
    );

    (sections, stats)
}

struct Walker<'a> {
    tool: &'a str,
    rows: &'a mut Vec<FlatRow>,
    stats: &'a mut FlattenStats,
}

impl Walker<'_> {
    fn walk(&mut self, node: &MetadataNode, prefix: Option<&str>, depth: usize) {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        for (key, value) in node {
            let path = match prefix {
                Some(prefix) => format!("{prefix}{KEY_PATH_SEPARATOR}{key}"),
                None => key.clone(),
            };

            if let MetadataValue::Node(child) = value {
                self.walk(child, Some(&path), depth + 1);
                continue;
            }

            match render_value(value) {
                Some(rendered) => {
                    self.stats.rows += 1;
                    self.rows.push(FlatRow::new(self.tool, path, format_key(key), rendered));
                }
                None => self.stats.skipped += 1,
            }
        }
    }
}
