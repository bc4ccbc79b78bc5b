//! metaview: Normalize and render multi-tool file metadata.
//!
//! A metadata extraction service runs several tools (exiftool, ffprobe,
//! mediainfo, ...) over an uploaded file and returns one JSON document keyed
//! by tool name. This crate turns that document into something a person can
//! read and search, and lets them add fields back to the file.
//!
//! # Features
//!
//! - **Flattening**: arbitrarily nested tool output becomes ordered, labelled rows
//! - **Live search**: case-insensitive filtering over labels and values
//! - **Field entry**: client-side validation before anything reaches the service
//! - **Exports**: text, JSON, CSV and standalone HTML
//! - **Dual Interface**: Both CLI (scriptable) and TUI (interactive) modes
//!
//! # Quick Start
//!
//! ```rust
//! use metaview::prelude::*;
//!
//! let doc = MetadataDocument::from_json_str(
//!     r#"{"exiftool": {"ImageSize": {"width": 4000}}, "ffprobe": {"error": "not installed"}}"#,
//! )?;
//!
//! let sections = flatten(&doc);
//! assert_eq!(sections[0].rows[0].key_path, "ImageSize_width");
//! assert_eq!(sections[0].rows[0].label, "Width");
//! assert!(sections[1].rows[0].is_error);
//!
//! let visible = filter_sections(&sections, "4000");
//! assert_eq!(visible.len(), 1);
//! # Ok::<(), metaview::MetaviewError>(())
//! ```
//!
//! # Architecture
//!
//! - [`model`]: documents, values, rows and field entries
//! - [`render`]: key labels, value text and markup escaping
//! - [`flatten`]: document to ordered tool sections
//! - [`search`]: row visibility for a query
//! - [`validate`]: checks for new fields
//! - [`export`]: output format generation
//! - [`client`]: extraction service client
//! - [`session`]: state for one file being inspected
//! - [`cli`]: Command-line interface
//! - [`tui`]: Terminal user interface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

#![doc(html_root_url = "https://docs.rs/metaview/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod flatten;
pub mod model;
pub mod render;
pub mod search;
pub mod session;
pub mod tui;
pub mod util;
pub mod validate;

// Re-export commonly used types at the crate root
pub use error::{MetaviewError, Result, ValidationError};
pub use model::{FlatRow, MetadataDocument, ToolSection};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::client::{HttpMetadataClient, MetadataService};
    pub use crate::error::{MetaviewError, Result, ValidationError};
    pub use crate::export::{ExportFormat, ExportOptions, Exporter};
    pub use crate::flatten::flatten;
    pub use crate::model::{
        FieldCategory, FieldEntry, FlatRow, MetadataDocument, MetadataValue, ToolResult,
        ToolSection,
    };
    pub use crate::render::{escape_markup, format_key, render_value};
    pub use crate::search::{filter_sections, is_visible};
    pub use crate::session::Session;
    pub use crate::validate::{validate, FieldInput};
}
