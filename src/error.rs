//! Error types for metaview.
//!
//! This module provides error handling following the thiserror pattern.
//! Field validation failures have their own small enum so callers can show a
//! message that tells the two validation kinds apart; everything else is
//! folded into [`MetaviewError`].

use std::path::PathBuf;

use thiserror::Error;

/// Rejection reasons for a user-submitted metadata field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The key or the value is empty after trimming.
    #[error("Key and value are both required")]
    EmptyField,

    /// The key contains characters outside `[A-Za-z0-9]` once whitespace is removed.
    #[error("Invalid field name '{key}': only letters and numbers are allowed")]
    InvalidKeyCharset {
        /// The whitespace-stripped key that was rejected.
        key: String,
    },
}

impl ValidationError {
    /// Short message suitable for a status line or toast.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyField => "Please fill in all fields",
            Self::InvalidKeyCharset { .. } => "Invalid field name. Use only letters and numbers.",
        }
    }
}

/// Primary error type for metaview operations.
#[derive(Error, Debug)]
pub enum MetaviewError {
    /// A submitted field failed client-side validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The metadata document has an unusable shape.
    #[error("Invalid metadata document: {message}")]
    InvalidDocument {
        /// Human-readable error message.
        message: String,
    },

    /// An operation needs an uploaded file but none is selected.
    #[error("No file selected")]
    NoFileSelected,

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Transport-level failure talking to the extraction service.
    #[error("Request to {url} failed: {source}")]
    Http {
        /// URL of the failed request.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status and no usable error body.
    #[error("Server responded with {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The service reported a failure in its response body.
    #[error("{message}")]
    ServiceRejected {
        /// Message reported by the service.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {context}")]
    SerializationError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// TUI error.
    #[error("TUI error: {message}")]
    TuiError {
        /// Human-readable error message.
        message: String,
    },

    /// Unsupported operation or feature.
    #[error("Unsupported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature.
        feature: String,
    },

    /// Interrupted operation.
    #[error("Operation interrupted")]
    Interrupted,
}

impl MetaviewError {
    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a new invalid document error.
    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create a new HTTP transport error.
    #[must_use]
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Create a new unsupported error.
    #[must_use]
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Get the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::InvalidDocument { .. } => exit_codes::EXIT_DATA_ERROR,
            Self::FileNotFound { .. } | Self::NoFileSelected => exit_codes::EXIT_FILE_NOT_FOUND,
            Self::ConfigError { .. } | Self::InvalidConfig { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::InvalidArgument { .. } => exit_codes::EXIT_USAGE_ERROR,
            Self::Http { .. } | Self::Server { .. } | Self::ServiceRejected { .. } => {
                exit_codes::EXIT_UNAVAILABLE
            }
            Self::IoError { .. } => exit_codes::EXIT_IO_ERROR,
            Self::Interrupted => exit_codes::EXIT_INTERRUPTED,
            _ => exit_codes::EXIT_GENERAL_ERROR,
        }
    }
}

/// Result type alias for metaview operations.
pub type Result<T> = std::result::Result<T, MetaviewError>;

impl From<std::io::Error> for MetaviewError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MetaviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            context: "JSON operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// General/unspecified error.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Specified file or file id not found.
    pub const EXIT_FILE_NOT_FOUND: i32 = 3;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// Invalid command-line usage (BSD standard).
    pub const EXIT_USAGE_ERROR: i32 = 64;
    /// Input data format error (BSD standard).
    pub const EXIT_DATA_ERROR: i32 = 65;
    /// Service unavailable (BSD standard).
    pub const EXIT_UNAVAILABLE: i32 = 69;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
    /// Terminated by Ctrl+C (128 + SIGINT).
    pub const EXIT_INTERRUPTED: i32 = 130;
}
