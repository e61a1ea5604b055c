//! Line prefixes
//!
//! Thread name, type label or glyph, and timestamp, in that order.

use crate::ansi;
use crate::config::TimeFormat;
use crate::models::{GlyphSet, Severity, TimeMode};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Everything needed to build one prefix
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrefixParts<'a> {
    pub severity: Severity,
    pub show_type: bool,
    pub glyphs: GlyphSet,
    pub thread_name: Option<&'a str>,
    pub timestamp: &'a str,
}

pub(crate) fn build_prefix(parts: PrefixParts<'_>) -> String {
    let mut prefix = String::new();

    // Locked so the severity style never recolours it
    if let Some(name) = parts.thread_name {
        prefix.push_str(&ansi::lock(&format!("[{name}] ")));
    }

    if parts.show_type {
        prefix.push_str(parts.severity.label());
    } else {
        prefix.push_str(parts.severity.glyph(parts.glyphs));
    }

    prefix.push_str(parts.timestamp);
    prefix
}

/// `[mm:ss:SSS] `, minutes wrapping at the hour
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let ms = millis % 1000;
    let s = (millis / 1000) % 60;
    let m = (millis / 60_000) % 60;
    format!("[{m:02}:{s:02}:{ms:03}] ")
}

/// `[<formatted wall clock>] `
pub(crate) fn format_absolute(now: &DateTime<Local>, format: &TimeFormat) -> String {
    format!("[{}] ", format.format(now))
}

pub(crate) fn format_timestamp(
    mode: TimeMode,
    now: impl FnOnce() -> DateTime<Local>,
    elapsed: impl FnOnce() -> Duration,
    format: &TimeFormat,
) -> String {
    match mode {
        TimeMode::None => String::new(),
        TimeMode::Absolute => format_absolute(&now(), format),
        TimeMode::Elapsed => format_elapsed(elapsed()),
    }
}
