//! User-submitted metadata fields and preset categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetaviewError;

/// A validated key/value pair ready for submission.
///
/// Only [`crate::validate::validate`] constructs these outside of tests, so a
/// `FieldEntry` always has a non-empty alphanumeric key and a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Alphanumeric key with all whitespace removed.
    pub key: String,
    /// Trimmed value.
    pub value: String,
    /// Whether the key came from free-form input rather than a preset.
    pub is_custom: bool,
}

/// Where a new field's key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    /// General-purpose presets.
    #[default]
    Common,
    /// Image presets (EXIF-style).
    Image,
    /// Video presets.
    Video,
    /// Audio presets.
    Audio,
    /// Free-form key entry.
    Custom,
}

impl FieldCategory {
    /// All categories in menu order.
    pub const ALL: [Self; 5] = [Self::Common, Self::Image, Self::Video, Self::Audio, Self::Custom];

    /// Query-string name used by the service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Custom => "custom",
        }
    }

    /// Whether keys in this category are typed by the user.
    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }

    /// Preset names known without asking the service.
    ///
    /// `Custom` has no presets. The lists match what the service returns for
    /// `supported-fields`.
    #[must_use]
    pub const fn builtin_presets(self) -> &'static [&'static str] {
        match self {
            Self::Common => &[
                "Title", "Description", "Comment", "Keywords", "Subject",
                "Author", "Creator", "Copyright", "Software", "Rating",
            ],
            Self::Image => &[
                "Artist", "Make", "Model", "DateTime", "GPSLatitude", "GPSLongitude",
                "Orientation", "XResolution", "YResolution", "ResolutionUnit",
            ],
            Self::Video => &[
                "Title", "Artist", "Album", "Genre", "Year", "Track",
                "Composer", "Director", "Producer", "Show", "Episode",
            ],
            Self::Audio => &[
                "Title", "Artist", "Album", "Genre", "Year", "Track",
                "Composer", "Publisher", "BPM", "Lyrics",
            ],
            Self::Custom => &[],
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldCategory {
    type Err = MetaviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MetaviewError::InvalidArgument {
                name: "category".to_string(),
                reason: format!("unknown field category '{s}'"),
            })
    }
}
