//! Time Format Patterns
//!
//! Absolute timestamps are configured with letter patterns such as `HH:mm:ss`
//! or `hh:mm a`. A pattern is compiled once into a `chrono` strftime string and
//! reused for every line.
//!
//! | letters | meaning              |
//! |---------|----------------------|
//! | `HH`/`H`| hour 00-23 / 0-23    |
//! | `hh`/`h`| hour 01-12 / 1-12    |
//! | `mm`/`m`| minute               |
//! | `ss`/`s`| second               |
//! | `SSS`   | millisecond          |
//! | `a`     | AM/PM                |
//! | `yyyy`/`yy` | year             |
//! | `MM`/`M`| month                |
//! | `dd`/`d`| day of month         |
//!
//! Text inside single quotes is copied literally (`''` is a quote). Any other
//! ASCII letter is rejected.

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt;

/// Default pattern for absolute timestamps
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";

/// A compiled timestamp pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    pattern: String,
    strftime: String,
}

impl TimeFormat {
    /// Compile a letter pattern
    pub fn parse(pattern: &str) -> Result<Self> {
        let strftime = translate(pattern)?;

        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidTimeFormat {
                pattern: pattern.to_string(),
                reason: "pattern does not compile".to_string(),
            });
        }

        Ok(Self {
            pattern: pattern.to_string(),
            strftime,
        })
    }

    /// The pattern as written
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format `time` with this pattern
    pub fn format<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        time.format(&self.strftime).to_string()
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_FORMAT.to_string(),
            strftime: "%H:%M:%S".to_string(),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn translate(pattern: &str) -> Result<String> {
    let invalid = |reason: String| Error::InvalidTimeFormat {
        pattern: pattern.to_string(),
        reason,
    };

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // Quoted literal; '' inside or outside quotes is a single quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            let mut j = i + 1;
            loop {
                match chars.get(j) {
                    None => return Err(invalid("unterminated quote".to_string())),
                    Some('\'') if chars.get(j + 1) == Some(&'\'') => {
                        out.push('\'');
                        j += 2;
                    }
                    Some('\'') => break,
                    Some(&lit) => {
                        push_literal(&mut out, lit);
                        j += 1;
                    }
                }
            }
            i = j + 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let directive = match (c, run) {
            ('H', 1) => "%-H",
            ('H', 2) => "%H",
            ('h', 1) => "%-I",
            ('h', 2) => "%I",
            ('m', 1) => "%-M",
            ('m', 2) => "%M",
            ('s', 1) => "%-S",
            ('s', 2) => "%S",
            ('S', 3) => "%3f",
            ('a', 1) => "%p",
            ('y', 2) => "%y",
            ('y', 4) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('d', 1) => "%-d",
            ('d', 2) => "%d",
            _ => {
                return Err(invalid(format!(
                    "unsupported pattern letters '{}'",
                    c.to_string().repeat(run)
                )))
            }
        };
        out.push_str(directive);
        i += run;
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
