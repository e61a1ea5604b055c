//! Timestamp Mode
//!
//! Selects how the pipeline prefixes each line with time information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp strategy for emitted lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// No timestamp prefix
    None,
    /// Local wall-clock time in the configured format
    Absolute,
    /// Time since the pipeline was created, as `[mm:ss:SSS]`
    #[default]
    Elapsed,
}

impl TimeMode {
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            TimeMode::None => 0,
            TimeMode::Absolute => 1,
            TimeMode::Elapsed => 2,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => TimeMode::None,
            1 => TimeMode::Absolute,
            _ => TimeMode::Elapsed,
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeMode::None => "none",
            TimeMode::Absolute => "absolute",
            TimeMode::Elapsed => "elapsed",
        };
        f.write_str(name)
    }
}

impl FromStr for TimeMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(TimeMode::None),
            "absolute" | "clock" => Ok(TimeMode::Absolute),
            "elapsed" => Ok(TimeMode::Elapsed),
            other => Err(crate::Error::ConfigValidationFailed {
                field: "time_mode".to_string(),
                reason: format!("unknown time mode '{}'", other),
            }),
        }
    }
}
