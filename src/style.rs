//! Style values and colour builders
//!
//! A [`Style`] is nothing more than the escape-code string a terminal should see
//! before styled text. Styles combine with [`Style::and`], which concatenates
//! codes left to right, so later codes win when two of them touch the same
//! attribute.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;

/// Control sequence introducer shared by every SGR code
pub const CSI: &str = "\x1b[";

macro_rules! sgr {
    ($n:literal) => {
        concat!("\x1b[", $n, "m")
    };
}

macro_rules! fg_code {
    ($r:literal, $g:literal, $b:literal) => {
        concat!("\x1b[38;2;", $r, ";", $g, ";", $b, "m")
    };
}

macro_rules! bg_code {
    ($r:literal, $g:literal, $b:literal) => {
        concat!("\x1b[48;2;", $r, ";", $g, ";", $b, "m")
    };
}

/// ANSI style expressed as a raw escape-code string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Style {
    code: Cow<'static, str>,
}

impl Style {
    // ------------------ Core ------------------
    pub const RESET: Style = Style::from_static(sgr!(0));

    // ------------------ Text attributes ------------------
    pub const BOLD: Style = Style::from_static(sgr!(1));
    pub const DIM: Style = Style::from_static(sgr!(2));
    pub const ITALIC: Style = Style::from_static(sgr!(3));
    pub const UNDERLINE: Style = Style::from_static(sgr!(4));
    pub const INVERT: Style = Style::from_static(sgr!(7));
    pub const STRIKETHROUGH: Style = Style::from_static(sgr!(9));

    // ------------------ Foreground colours ------------------
    pub const BLACK: Style = Style::from_static(fg_code!(35, 35, 40));
    pub const GRAY: Style = Style::from_static(fg_code!(110, 115, 125));
    pub const LIGHT_GRAY: Style = Style::from_static(fg_code!(175, 180, 190));
    pub const CHARCOAL: Style = Style::from_static(fg_code!(55, 70, 80));
    pub const SILVER: Style = Style::from_static(fg_code!(190, 190, 190));
    pub const WHITE: Style = Style::from_static(fg_code!(245, 245, 245));

    pub const RED: Style = Style::from_static(fg_code!(220, 55, 70));
    pub const ORANGE: Style = Style::from_static(fg_code!(255, 140, 0));
    pub const AMBER: Style = Style::from_static(fg_code!(255, 195, 5));
    pub const YELLOW: Style = Style::from_static(fg_code!(255, 215, 0));
    pub const GOLD: Style = Style::from_static(fg_code!(210, 175, 55));
    pub const LIME: Style = Style::from_static(fg_code!(190, 255, 0));
    pub const GREEN: Style = Style::from_static(fg_code!(40, 165, 70));
    pub const MINT: Style = Style::from_static(fg_code!(150, 250, 150));
    pub const TEAL: Style = Style::from_static(fg_code!(55, 160, 160));
    pub const CYAN: Style = Style::from_static(fg_code!(0, 190, 210));
    pub const SKY: Style = Style::from_static(fg_code!(135, 205, 250));
    pub const BLUE: Style = Style::from_static(fg_code!(0, 123, 255));
    pub const INDIGO: Style = Style::from_static(fg_code!(75, 0, 130));
    pub const PURPLE: Style = Style::from_static(fg_code!(110, 65, 195));
    pub const VIOLET: Style = Style::from_static(fg_code!(150, 0, 210));
    pub const LAVENDER: Style = Style::from_static(fg_code!(180, 125, 220));
    pub const PINK: Style = Style::from_static(fg_code!(255, 105, 180));
    pub const ROSE: Style = Style::from_static(fg_code!(255, 180, 195));
    pub const CORAL: Style = Style::from_static(fg_code!(255, 130, 80));
    pub const BROWN: Style = Style::from_static(fg_code!(140, 70, 20));
    pub const SAND: Style = Style::from_static(fg_code!(195, 180, 130));

    // ------------------ Background colours ------------------
    pub const BG_BLACK: Style = Style::from_static(bg_code!(35, 35, 40));
    pub const BG_GRAY: Style = Style::from_static(bg_code!(110, 115, 125));
    pub const BG_LIGHT_GRAY: Style = Style::from_static(bg_code!(175, 180, 190));
    pub const BG_CHARCOAL: Style = Style::from_static(bg_code!(55, 70, 80));
    pub const BG_SILVER: Style = Style::from_static(bg_code!(190, 190, 190));
    pub const BG_WHITE: Style = Style::from_static(bg_code!(245, 245, 245));

    pub const BG_RED: Style = Style::from_static(bg_code!(220, 55, 70));
    pub const BG_ORANGE: Style = Style::from_static(bg_code!(255, 140, 0));
    pub const BG_AMBER: Style = Style::from_static(bg_code!(255, 195, 5));
    pub const BG_YELLOW: Style = Style::from_static(bg_code!(255, 215, 0));
    pub const BG_GOLD: Style = Style::from_static(bg_code!(210, 175, 55));
    pub const BG_LIME: Style = Style::from_static(bg_code!(190, 255, 0));
    pub const BG_GREEN: Style = Style::from_static(bg_code!(40, 165, 70));
    pub const BG_MINT: Style = Style::from_static(bg_code!(150, 250, 150));
    pub const BG_TEAL: Style = Style::from_static(bg_code!(55, 160, 160));
    pub const BG_CYAN: Style = Style::from_static(bg_code!(0, 190, 210));
    pub const BG_SKY: Style = Style::from_static(bg_code!(135, 205, 250));
    pub const BG_BLUE: Style = Style::from_static(bg_code!(0, 123, 255));
    pub const BG_INDIGO: Style = Style::from_static(bg_code!(75, 0, 130));
    pub const BG_PURPLE: Style = Style::from_static(bg_code!(110, 65, 195));
    pub const BG_VIOLET: Style = Style::from_static(bg_code!(150, 0, 210));
    pub const BG_LAVENDER: Style = Style::from_static(bg_code!(180, 125, 220));
    pub const BG_PINK: Style = Style::from_static(bg_code!(255, 105, 180));
    pub const BG_ROSE: Style = Style::from_static(bg_code!(255, 180, 195));
    pub const BG_CORAL: Style = Style::from_static(bg_code!(255, 130, 80));
    pub const BG_BROWN: Style = Style::from_static(bg_code!(140, 70, 20));
    pub const BG_SAND: Style = Style::from_static(bg_code!(195, 180, 130));

    // ------------------ Semantic aliases ------------------
    pub const INFO: Style = Style::from_static(concat!(fg_code!(0, 190, 210), sgr!(3)));
    pub const SUCCESS: Style = Style::GREEN;
    pub const WARNING: Style = Style::AMBER;
    pub const ERROR: Style = Style::RED;
    pub const LOG: Style = Style::from_static(concat!(fg_code!(190, 190, 190), sgr!(3)));
    pub const MUTED: Style = Style::from_static(concat!(fg_code!(110, 115, 125), sgr!(2)));

    /// Wrap a static escape-code string
    pub const fn from_static(code: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
        }
    }

    /// Wrap an arbitrary escape-code string
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Cow::Owned(code.into()),
        }
    }

    /// The raw escape code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Combine two styles; `self`'s codes come first
    pub fn and(&self, other: &Style) -> Style {
        let mut code = String::with_capacity(self.code.len() + other.code.len());
        code.push_str(&self.code);
        code.push_str(&other.code);
        Style::new(code)
    }

    /// Render `text` with this style, leaving escape sequences and locked
    /// regions untouched
    pub fn apply(&self, text: &str) -> String {
        crate::ansi::render(text, std::slice::from_ref(self))
    }

    // ------------------ Colour builders ------------------

    /// Truecolor foreground
    pub fn fg(r: u8, g: u8, b: u8) -> Style {
        Style::new(format!("{CSI}38;2;{r};{g};{b}m"))
    }

    /// Truecolor background
    pub fn bg(r: u8, g: u8, b: u8) -> Style {
        Style::new(format!("{CSI}48;2;{r};{g};{b}m"))
    }

    /// 256-colour foreground
    pub fn fg256(index: u8) -> Style {
        Style::new(format!("{CSI}38;5;{index}m"))
    }

    /// 256-colour background
    pub fn bg256(index: u8) -> Style {
        Style::new(format!("{CSI}48;5;{index}m"))
    }

    /// Truecolor foreground from `#RRGGBB` or `RRGGBB`
    pub fn fg_hex(hex: &str) -> Result<Style> {
        let (r, g, b) = parse_hex(hex)?;
        Ok(Style::fg(r, g, b))
    }

    /// Truecolor background from `#RRGGBB` or `RRGGBB`
    pub fn bg_hex(hex: &str) -> Result<Style> {
        let (r, g, b) = parse_hex(hex)?;
        Ok(Style::bg(r, g, b))
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::from_static("")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl AsRef<str> for Style {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl<'a> FromIterator<&'a Style> for Style {
    fn from_iter<I: IntoIterator<Item = &'a Style>>(iter: I) -> Self {
        Style::new(iter.into_iter().map(Style::code).collect::<String>())
    }
}

/// Concatenated codes of `styles` with no trailing reset
pub fn open(styles: &[Style]) -> String {
    styles.iter().map(Style::code).collect()
}

/// The reset code
pub fn close() -> &'static str {
    sgr!(0)
}

fn parse_hex(input: &str) -> Result<(u8, u8, u8)> {
    let invalid = |reason: &str| Error::InvalidColor {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("expected 6 hex digits with an optional leading '#'"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| invalid(&e.to_string()))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
