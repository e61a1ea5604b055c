//! Severity Levels
//!
//! [`Level`] is the coarse priority used for filtering. [`Severity`] is the
//! closed set of message kinds, each bound to a level, a label, a glyph and a
//! default style.

use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filtering priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational and routine output
    #[default]
    Low,
    /// Warnings, errors and success notices
    High,
}

impl Level {
    /// Integer priority; a message is shown iff its priority is at least the threshold's
    pub fn priority(self) -> u8 {
        match self {
            Level::Low => 1,
            Level::High => 2,
        }
    }

    pub(crate) fn from_priority(priority: u8) -> Self {
        if priority >= Level::High.priority() {
            Level::High
        } else {
            Level::Low
        }
    }

    /// True when a message at `self` passes `threshold`
    pub fn passes(self, threshold: Level) -> bool {
        self.priority() >= threshold.priority()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("low"),
            Level::High => f.write_str("high"),
        }
    }
}

impl FromStr for Level {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Level::Low),
            "high" => Ok(Level::High),
            other => Err(crate::Error::ConfigValidationFailed {
                field: "level".to_string(),
                reason: format!("unknown level '{}'", other),
            }),
        }
    }
}

/// Glyph family used when type labels are hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    #[default]
    Ascii,
    Unicode,
}

impl GlyphSet {
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            GlyphSet::Ascii => 0,
            GlyphSet::Unicode => 1,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        if value == 1 {
            GlyphSet::Unicode
        } else {
            GlyphSet::Ascii
        }
    }
}

/// Kind of message emitted by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Log,
    Warn,
    Error,
    Success,
}

impl Severity {
    /// Every severity, in display order
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Log,
        Severity::Warn,
        Severity::Error,
        Severity::Success,
    ];

    /// Filtering level this severity is bound to
    pub fn level(self) -> Level {
        match self {
            Severity::Info | Severity::Log => Level::Low,
            Severity::Warn | Severity::Error | Severity::Success => Level::High,
        }
    }

    /// Bracketed type label, padded so messages line up
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "[INFO]    ",
            Severity::Log => "[LOG]     ",
            Severity::Warn => "[WARN]    ",
            Severity::Error => "[ERROR]   ",
            Severity::Success => "[SUCCESS] ",
        }
    }

    /// Short glyph used in place of the label
    pub fn glyph(self, set: GlyphSet) -> &'static str {
        match (set, self) {
            (GlyphSet::Ascii, Severity::Info) => "i ",
            (GlyphSet::Ascii, Severity::Log) => "* ",
            (GlyphSet::Ascii, Severity::Warn) => "? ",
            (GlyphSet::Ascii, Severity::Error) => "x ",
            (GlyphSet::Ascii, Severity::Success) => "+ ",
            (GlyphSet::Unicode, Severity::Info) => "¡ ",
            (GlyphSet::Unicode, Severity::Log) => "• ",
            (GlyphSet::Unicode, Severity::Warn) => "? ",
            (GlyphSet::Unicode, Severity::Error) => "✖ ",
            (GlyphSet::Unicode, Severity::Success) => "✔ ",
        }
    }

    /// Default style for lines of this severity
    pub fn style(self) -> Style {
        match self {
            Severity::Info => Style::INFO,
            Severity::Log => Style::LOG,
            Severity::Warn => Style::WARNING,
            Severity::Error => Style::ERROR,
            Severity::Success => Style::SUCCESS,
        }
    }
}
