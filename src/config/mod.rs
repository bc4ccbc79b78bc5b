//! Configuration management for metaview.
//!
//! Handles:
//! - Extraction service location and timeout
//! - Display defaults
//! - Field category defaults
//! - Theme settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MetaviewError, Result};
use crate::model::FieldCategory;
use crate::util::atomic_write;

/// Environment variable overriding `server.url`.
pub const SERVER_ENV: &str = "METAVIEW_SERVER";

/// Default extraction service address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Extraction service.
    #[serde(default)]
    pub server: ServerConfig,
    /// Display options.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Field entry defaults.
    #[serde(default)]
    pub fields: FieldsConfig,
    /// TUI theme.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from `path` if given, else from the default location.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(MetaviewError::FileNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MetaviewError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| MetaviewError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path.
    ///
    /// The file is written atomically; parent directories are created.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        atomic_write(path, content.as_bytes())?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MetaviewError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })
    }

    /// Apply a server URL override (from `--server` or the environment).
    pub fn apply_server_override(&mut self, url: Option<&str>) {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.server.url = url.to_string();
        }
    }
}

/// Extraction service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the service.
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ServerConfig {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Default export format for `show`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Use color output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Print the file information header.
    #[serde(default = "default_true")]
    pub show_file_info: bool,
    /// Truncate long values at this many characters (0 = never).
    #[serde(default)]
    pub truncate_at: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
            show_file_info: true,
            truncate_at: 0,
        }
    }
}

impl DisplayConfig {
    /// Truncation limit, if any.
    #[must_use]
    pub const fn truncate_limit(&self) -> Option<usize> {
        if self.truncate_at == 0 {
            None
        } else {
            Some(self.truncate_at)
        }
    }
}

/// Field entry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsConfig {
    /// Category selected when none is given.
    #[serde(default)]
    pub default_category: FieldCategory,
}

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name (`default`, `dark`, `light`, `high-contrast`).
    #[serde(default = "default_theme")]
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_format() -> String {
    "text".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| MetaviewError::unsupported("config directory discovery"))?;

    Ok(config_dir.join("metaview").join("config.toml"))
}
