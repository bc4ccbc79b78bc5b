//! Data model for multi-tool file metadata.
//!
//! - [`MetadataDocument`]: tool name to [`ToolResult`], in display order
//! - [`MetadataValue`]: the closed set of value shapes tools can emit
//! - [`FlatRow`] / [`ToolSection`]: display rows produced by the flattener
//! - [`FieldEntry`] / [`FieldCategory`]: user additions and preset categories
//! - [`FileInfo`]: typed view of basic file information

pub mod document;
pub mod field;
pub mod file_info;
pub mod row;
pub mod value;

pub use document::*;
pub use field::*;
pub use file_info::*;
pub use row::*;
pub use value::*;
