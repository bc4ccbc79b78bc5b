//! Utility functions for common operations.
//!
//! This module provides shared utilities used across the crate:
//! - Atomic file writes for exports, downloads and configuration
//! - Human-readable sizes
//! - Display truncation

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{MetaviewError, Result};

/// Atomically write content to a file.
///
/// The content goes to a temporary file in the target's directory, is
/// flushed, and then renamed over the target. If any step fails the original
/// file (if it exists) remains unchanged.
///
/// # Example
///
/// ```rust,no_run
/// use metaview::util::atomic_write;
///
/// atomic_write("config.toml", b"[server]\n").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(MetaviewError::IoError {
                context: format!("Cannot determine parent directory for: {}", path.display()),
                source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
            })
        }
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            MetaviewError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    // Same directory keeps the rename on one filesystem
    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        MetaviewError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        MetaviewError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        MetaviewError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        MetaviewError::io(format!("Failed to atomically write file: {}", path.display()), e.error)
    })?;

    Ok(())
}

/// Format a byte count the way the extraction service does (`1.50 KB`).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} PB")
}

/// Truncate `text` to at most `max_chars` characters, appending `…` when cut.
#[must_use]
pub fn truncate_display(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}…", &text[..byte_idx])),
        None => Cow::Borrowed(text),
    }
}

/// Reduce a service file id to a safe local file name.
#[must_use]
pub fn local_file_name(file_id: &str) -> String {
    let name: String = file_id
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_id)
        .chars()
        .filter(|c| !c.is_control())
        .collect();

    if name.trim_matches('.').is_empty() {
        "download".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        atomic_write(&path, b"first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_truncate_display() {
        assert_eq!(truncate_display("hello", 10), "hello");
        assert_eq!(truncate_display("hello", 5), "hello");
        assert_eq!(truncate_display("hello world", 5), "hello…");
        assert_eq!(truncate_display("ééé", 2), "éé…");
    }

    #[test]
    fn test_local_file_name() {
        assert_eq!(local_file_name("20250101_120000_a.jpg"), "20250101_120000_a.jpg");
        assert_eq!(local_file_name("../../etc/passwd"), "passwd");
        assert_eq!(local_file_name(".."), "download");
        assert_eq!(local_file_name(""), "download");
    }
}
