//! Integration tests for metaview.
//!
//! These tests drive the full flatten, search and export pipeline over a
//! sample service response stored under `tests/fixtures`.

use std::path::PathBuf;

use metaview::export::{export_to_file, export_to_string, ExportFormat, ExportOptions};
use metaview::flatten::{flatten, flatten_with_stats};
use metaview::model::{FieldCategory, MetadataDocument, ToolSection};
use metaview::search::{count_visible, filter_sections};
use metaview::validate::{validate, FieldInput};
use metaview::ValidationError;
use pretty_assertions::assert_eq;

/// Get the path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load and parse a fixture document.
fn load_fixture(name: &str) -> MetadataDocument {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e));

    MetadataDocument::from_json_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", name, e))
}

fn sample_sections() -> Vec<ToolSection> {
    flatten(&load_fixture("sample_document.json"))
}

mod flattening {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_order_follows_document() {
        let sections = sample_sections();
        let tools: Vec<&str> = sections.iter().map(|s| s.tool.as_str()).collect();

        // hachoir is empty and pillow is null, so neither gets a section
        assert_eq!(tools, vec!["file_info", "exiftool", "ffprobe", "mediainfo"]);
    }

    #[test]
    fn test_nested_key_paths_and_labels() {
        let sections = sample_sections();
        let exif = &sections[1];

        let paths: Vec<&str> = exif.rows.iter().map(|r| r.key_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "Make",
                "Model",
                "ISO",
                "exposureTime",
                "flashFired",
                "ImageSize_width",
                "ImageSize_height",
                "gpsInfo_lat",
                "gpsInfo_lon",
                "Keywords",
                "Comment",
            ]
        );

        let labels: Vec<&str> = exif.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels[3], "Exposure Time");
        assert_eq!(labels[4], "Flash Fired");
        assert_eq!(labels[5], "Width");
        assert_eq!(labels[7], "Lat");
    }

    #[test]
    fn test_value_rendering() {
        let sections = sample_sections();
        let value = |path: &str| {
            sections[1]
                .rows
                .iter()
                .find(|r| r.key_path == path)
                .map(|r| r.value.clone())
                .unwrap_or_else(|| panic!("missing row {path}"))
        };

        assert_eq!(value("ISO"), "400");
        assert_eq!(value("exposureTime"), "0.004");
        assert_eq!(value("flashFired"), "false");
        assert_eq!(value("Keywords"), "[\n  \"paris\",\n  \"tower\"\n]");
        // Raw text in the row; escaping happens only in HTML output
        assert_eq!(value("Comment"), "<b>night</b> & day");
    }

    #[test]
    fn test_error_tools() {
        let sections = sample_sections();

        let ffprobe = &sections[2];
        assert!(ffprobe.is_error());
        assert_eq!(ffprobe.rows.len(), 1);
        assert_eq!(ffprobe.rows[0].value, "ffprobe not installed");

        // A falsy error member is ordinary metadata
        let mediainfo = &sections[3];
        assert!(!mediainfo.is_error());
        assert_eq!(mediainfo.rows[0].label, "Error");
        assert_eq!(mediainfo.rows[0].value, "false");
        assert!(!mediainfo.rows[0].is_error);
    }

    #[test]
    fn test_stats() {
        let (sections, stats) = flatten_with_stats(&load_fixture("sample_document.json"));
        assert_eq!(stats.sections, sections.len());
        assert_eq!(stats.tools_seen, 5);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.empty_tools, 1);
        assert_eq!(stats.rows, 22);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_file_info_is_read() {
        let info = load_fixture("sample_document.json").file_info().unwrap();
        assert_eq!(info.display_name(), "IMG_0042.jpg");
        assert_eq!(info.display_type(), "image/jpeg");
        assert_eq!(info.display_size(), "2.34 MB");
        assert_eq!(info.display_modified().as_deref(), Some("2025-03-14 09:26:53"));
    }

    #[test]
    fn test_flatten_is_deterministic() {
        assert_eq!(sample_sections(), sample_sections());
    }
}

mod searching {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_query_shows_everything() {
        let sections = sample_sections();
        assert_eq!(count_visible(&sections, ""), 23);
        assert_eq!(filter_sections(&sections, "").len(), sections.len());
    }

    #[test]
    fn test_matches_label_or_value_case_insensitively() {
        let sections = sample_sections();

        let by_value = filter_sections(&sections, "CANON");
        assert_eq!(by_value.len(), 1);
        assert_eq!(by_value[0].tool, "exiftool");
        assert_eq!(by_value[0].rows[0].key_path, "Make");

        // "Width" is only a label; the raw key is ImageSize_width
        let by_label = filter_sections(&sections, "width");
        assert_eq!(by_label[0].rows.len(), 1);
        assert_eq!(by_label[0].rows[0].value, "8192");
    }

    #[test]
    fn test_sections_without_matches_are_hidden() {
        let sections = sample_sections();
        let visible = filter_sections(&sections, "not installed");
        let tools: Vec<&str> = visible.iter().map(|s| s.tool).collect();
        assert_eq!(tools, vec!["ffprobe"]);
        assert!(filter_sections(&sections, "no such text").is_empty());
    }
}

mod validation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_custom_and_preset_entries() {
        let entry = FieldInput::custom(" Lens Model ", " RF 50mm ").validate().unwrap();
        assert_eq!(entry.key, "LensModel");
        assert_eq!(entry.value, "RF 50mm");
        assert!(entry.is_custom);

        let entry = FieldInput::preset(FieldCategory::Image, "Artist", "Jane").validate().unwrap();
        assert_eq!(entry.key, "Artist");
        assert!(!entry.is_custom);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(validate("", "x", true, ""), Err(ValidationError::EmptyField));
        assert_eq!(
            validate("gps-lat", "1", true, ""),
            Err(ValidationError::InvalidKeyCharset {
                key: "gps-lat".to_string()
            })
        );
    }
}

mod exporting {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_export_with_file_info() {
        let doc = load_fixture("sample_document.json");
        let sections = flatten(&doc);
        let info = doc.file_info();
        let options = ExportOptions::default().with_query("canon");

        let text = export_to_string(&sections, info.as_ref(), ExportFormat::Text, &options).unwrap();
        assert_eq!(
            text,
            "File: IMG_0042.jpg\n\
             Type: image/jpeg\n\
             Size: 2.34 MB\n\
             Modified: 2025-03-14 09:26:53\n\
             \n\
             EXIFTOOL\n  Make: Canon\n"
        );
    }

    #[test]
    fn test_json_bare_and_enveloped() {
        let doc = load_fixture("sample_document.json");
        let sections = flatten(&doc);
        let options = ExportOptions::default().with_query("ffprobe");

        let bare = export_to_string(&sections, None, ExportFormat::Json, &options).unwrap();
        let bare: serde_json::Value = serde_json::from_str(&bare).unwrap();
        assert!(bare.is_array());
        assert_eq!(bare[0]["tool"], "ffprobe");
        assert_eq!(bare[0]["rows"][0]["is_error"], true);

        let info = doc.file_info();
        let wrapped =
            export_to_string(&sections, info.as_ref(), ExportFormat::JsonPretty, &options).unwrap();
        let wrapped: serde_json::Value = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(wrapped["row_count"], 1);
        assert_eq!(wrapped["file_info"]["name"], "IMG_0042.jpg");
    }

    #[test]
    fn test_html_escapes_values() {
        let sections = sample_sections();
        let html =
            export_to_string(&sections, None, ExportFormat::Html, &ExportOptions::default()).unwrap();

        assert!(html.contains("&lt;b&gt;night&lt;/b&gt; &amp; day"));
        assert!(!html.contains("<b>night</b>"));
        assert!(html.contains("metadata-value error"));
    }

    #[test]
    fn test_without_errors() {
        let sections = sample_sections();
        let options = ExportOptions::default().with_errors(false);
        let csv = export_to_string(&sections, None, ExportFormat::Csv, &options).unwrap();

        assert!(csv.starts_with("tool,key_path,label,value,is_error\n"));
        assert!(!csv.contains("ffprobe"));
        // mediainfo's falsy error member is a normal row
        assert!(csv.contains("mediainfo,error,Error,false,false\n"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        let sections = sample_sections();

        export_to_file(&sections, None, &path, ExportFormat::Csv, &ExportOptions::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Header, one line per row, and three more for the multi-line Keywords value
        assert_eq!(content.lines().count(), 1 + 23 + 3);
    }
}
