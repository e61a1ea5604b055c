//! Lock-aware ANSI escape processing
//!
//! This module splits a message into locked regions, raw escape sequences and
//! literal text, and rebuilds it with the requested styles applied to the
//! literal text only.
//!
//! A locked region is any text wrapped by [`lock`]. The markers are private-mode
//! sequences (`ESC[?200h` / `ESC[?200l`) that terminals ignore, so locked text
//! can travel through further rendering passes and still reach the terminal as
//! written.

use crate::style::Style;
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker opening a locked region
pub const LOCK_START: &str = "\x1b[?200h";

/// Marker closing a locked region
pub const LOCK_END: &str = "\x1b[?200l";

/// Escape sequences passed through verbatim: ESC, `[`, parameters, final letter
static ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("escape sequence pattern is a valid regex")
});

/// One classified piece of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A region delimited by lock markers, markers included
    Locked(&'a str),
    /// A raw escape sequence outside any locked region
    Escape(&'a str),
    /// Literal text that receives styling
    Text(&'a str),
}

impl<'a> Segment<'a> {
    /// The original bytes of this segment
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Locked(s) | Segment::Escape(s) | Segment::Text(s) => s,
        }
    }
}

/// Wrap `text` in lock markers
pub fn lock(text: &str) -> String {
    let mut out = String::with_capacity(LOCK_START.len() + text.len() + LOCK_END.len());
    out.push_str(LOCK_START);
    out.push_str(text);
    out.push_str(LOCK_END);
    out
}

/// Remove every lock marker from `text`
pub fn unlock(text: &str) -> String {
    text.replace(LOCK_START, "").replace(LOCK_END, "")
}

/// True when both markers appear somewhere in `text`.
///
/// Pairing and ordering are not checked: a stray start marker and an unrelated
/// end marker are enough.
pub fn is_locked(text: &str) -> bool {
    text.contains(LOCK_START) && text.contains(LOCK_END)
}

/// Cut `text` before every start marker and after every end marker
fn split_at_locks(text: &str) -> Vec<&str> {
    let mut cuts: Vec<usize> = text
        .match_indices(LOCK_START)
        .map(|(i, _)| i)
        .chain(text.match_indices(LOCK_END).map(|(i, m)| i + m.len()))
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut last = 0;
    for cut in cuts {
        if cut > last {
            pieces.push(&text[last..cut]);
            last = cut;
        }
    }
    if last < text.len() {
        pieces.push(&text[last..]);
    }
    pieces
}

/// Classify `text` into locked regions, escape sequences and literal runs
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();

    for piece in split_at_locks(text) {
        if is_locked(piece) {
            segments.push(Segment::Locked(piece));
            continue;
        }

        let mut last_end = 0;
        for mat in ESCAPE_REGEX.find_iter(piece) {
            if mat.start() > last_end {
                segments.push(Segment::Text(&piece[last_end..mat.start()]));
            }
            segments.push(Segment::Escape(mat.as_str()));
            last_end = mat.end();
        }
        if last_end < piece.len() {
            segments.push(Segment::Text(&piece[last_end..]));
        }
    }

    segments
}

/// Apply `styles` to every literal run of `text`.
///
/// Each literal run becomes the styles' codes, the run, and a reset. Escape
/// sequences and locked regions are copied unchanged. With no styles the runs
/// still receive the trailing reset. Empty input comes back empty.
pub fn render(text: &str, styles: &[Style]) -> String {
    if text.is_empty() {
        return String::new();
    }

    let prefix = crate::style::open(styles);
    let reset = Style::RESET;
    let mut out = String::with_capacity(text.len() * 2);

    for segment in tokenize(text) {
        match segment {
            Segment::Locked(s) | Segment::Escape(s) => out.push_str(s),
            Segment::Text(s) => {
                out.push_str(&prefix);
                out.push_str(s);
                out.push_str(reset.code());
            }
        }
    }

    out
}
