//! Show command implementation.
//!
//! Flattens a metadata document stored on disk (or read from stdin).

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::cli::{Cli, ShowArgs};
use crate::error::{MetaviewError, Result};
use crate::flatten::flatten_with_stats;
use crate::model::MetadataDocument;

use super::render_view;

/// Run the show command.
pub fn run(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let config = cli.load_config()?;
    let document = read_document(&args.input)?;

    let (sections, stats) = flatten_with_stats(&document);
    debug!(?stats, "Flattened document");

    render_view(cli, &args.view, &config, &sections, document.file_info().as_ref())
}

/// Read a document from `path`, or from stdin when `path` is `-`.
pub fn read_document(path: &Path) -> Result<MetadataDocument> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| MetaviewError::io("Failed to read stdin", e))?;
        buffer
    } else {
        if !path.exists() {
            return Err(MetaviewError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        std::fs::read_to_string(path)
            .map_err(|e| MetaviewError::io(format!("Failed to read {}", path.display()), e))?
    };

    MetadataDocument::from_json_str(&content)
}
