//! Error types and Result aliases for Quill

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for Quill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Quill
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Style errors ===
    /// A colour string could not be turned into an escape code
    #[error("Invalid color '{input}': {reason}")]
    InvalidColor { input: String, reason: String },

    // === Pipeline errors ===
    /// A cancellable sleep was interrupted before the full duration elapsed
    #[error("Wait of {requested:?} was interrupted")]
    InterruptedWait { requested: Duration },

    /// A timestamp pattern could not be compiled
    #[error("Invalid time format '{pattern}': {reason}")]
    InvalidTimeFormat { pattern: String, reason: String },

    // === Configuration errors ===
    /// Failed to load configuration file
    #[error("Failed to load config from '{}': {reason}", .path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse configuration
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    #[error("Failed to serialize config as {format}: {reason}")]
    ConfigSerializationFailed { format: String, reason: String },

    // === I/O ===
    /// Sink and file I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Generic fallback (use sparingly) ===
    #[error("Error: {0}")]
    Other(String),
}

impl Error {
    /// True when the error came from an interrupted sleep
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::InterruptedWait { .. })
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
