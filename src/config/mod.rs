//! Configuration management for Quill
//!
//! [`PipelineConfig`] is the serializable form of a pipeline's settings. It can
//! be loaded from TOML or JSON with [`loader::ConfigLoader`], applied to a live
//! [`crate::Pipeline`], or captured back from one.

pub mod loader;
pub mod time_format;

use crate::error::{Error, Result};
use crate::models::{GlyphSet, Level, TimeMode};
use serde::{Deserialize, Serialize};

pub use time_format::{TimeFormat, DEFAULT_TIME_FORMAT};

/// Settings for one pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum level a message needs to be written
    pub level: Level,

    /// Show `[INFO]`-style labels instead of glyphs
    pub show_type: bool,

    /// Prefix each line with the emitting thread's name
    pub show_thread: bool,

    /// Timestamp strategy
    pub time_mode: TimeMode,

    /// Pattern for absolute timestamps, e.g. `HH:mm:ss`
    pub time_format: String,

    /// Glyph family used when labels are hidden
    pub glyphs: GlyphSet,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            level: Level::Low,
            show_type: false,
            show_thread: false,
            time_mode: TimeMode::Elapsed,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            glyphs: GlyphSet::Ascii,
        }
    }
}

impl PipelineConfig {
    /// Check every field that can be invalid
    pub fn validate(&self) -> Result<()> {
        if self.time_format.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "time_format".to_string(),
                reason: "Time format cannot be empty".to_string(),
            });
        }

        TimeFormat::parse(&self.time_format).map_err(|e| Error::ConfigValidationFailed {
            field: "time_format".to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Compiled time format
    pub fn compiled_time_format(&self) -> Result<TimeFormat> {
        TimeFormat::parse(&self.time_format)
    }
}
