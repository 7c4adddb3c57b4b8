//! Timestamp formatting for the `%d` layout directive
//!
//! Formats are compiled once into a token list and written field by field, so
//! rendering a timestamp never allocates. Supported specifiers:
//!
//! | Specifier | Output                         |
//! |-----------|--------------------------------|
//! | `%Y`      | four digit year                |
//! | `%m`      | month `01`-`12`                |
//! | `%d`      | day `01`-`31`                  |
//! | `%H`      | hour `00`-`23`                 |
//! | `%M`      | minute                         |
//! | `%S`      | second                         |
//! | `%3f`     | milliseconds `000`-`999`       |
//! | `%6f`     | microseconds `000000`-`999999` |
//! | `%s`      | Unix seconds                   |
//! | `%%`      | literal `%`                    |
//!
//! Named presets: `ISO8601` (default), `UNIX`, `UNIX_MILLIS`.

use super::error::{LoggerError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum DateToken {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Micros,
    UnixSeconds,
    UnixMillis,
    Literal(String),
}

/// Compiled timestamp format
///
/// # Examples
///
/// ```
/// use rust_layout_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let format = TimestampFormat::compile("%Y/%m/%d %H:%M").unwrap();
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format.format(&ts), "2025/01/08 10:30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    source: String,
    tokens: Vec<DateToken>,
}

impl TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    pub const ISO8601: &'static str = "%Y-%m-%dT%H:%M:%S.%3fZ";

    pub fn compile(format_str: &str) -> Result<Self> {
        Self::compile_at(format_str, 0)
    }

    /// Compile with error offsets reported relative to `base_offset`.
    pub(crate) fn compile_at(format_str: &str, base_offset: usize) -> Result<Self> {
        let tokens = match format_str {
            "" | "ISO8601" => return Ok(Self::default()),
            "UNIX" => vec![DateToken::UnixSeconds],
            "UNIX_MILLIS" => vec![DateToken::UnixMillis],
            _ => parse_tokens(format_str, base_offset)?,
        };
        Ok(Self {
            source: format_str.to_string(),
            tokens,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Write the timestamp field by field into `w`.
    pub fn write_to<W: fmt::Write>(&self, w: &mut W, ts: &DateTime<Utc>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                DateToken::Year => write!(w, "{:04}", ts.year())?,
                DateToken::Month => write!(w, "{:02}", ts.month())?,
                DateToken::Day => write!(w, "{:02}", ts.day())?,
                DateToken::Hour => write!(w, "{:02}", ts.hour())?,
                DateToken::Minute => write!(w, "{:02}", ts.minute())?,
                DateToken::Second => write!(w, "{:02}", ts.second())?,
                DateToken::Millis => {
                    write!(w, "{:03}", ts.timestamp_subsec_millis().min(999))?
                }
                DateToken::Micros => {
                    write!(w, "{:06}", ts.timestamp_subsec_micros().min(999_999))?
                }
                DateToken::UnixSeconds => write!(w, "{}", ts.timestamp())?,
                DateToken::UnixMillis => write!(w, "{}", ts.timestamp_millis())?,
                DateToken::Literal(text) => w.write_str(text)?,
            }
        }
        Ok(())
    }

    /// Allocating convenience wrapper around [`TimestampFormat::write_to`]
    #[must_use]
    pub fn format(&self, ts: &DateTime<Utc>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out, ts);
        out
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            source: "ISO8601".to_string(),
            tokens: vec![
                DateToken::Year,
                DateToken::Literal("-".to_string()),
                DateToken::Month,
                DateToken::Literal("-".to_string()),
                DateToken::Day,
                DateToken::Literal("T".to_string()),
                DateToken::Hour,
                DateToken::Literal(":".to_string()),
                DateToken::Minute,
                DateToken::Literal(":".to_string()),
                DateToken::Second,
                DateToken::Literal(".".to_string()),
                DateToken::Millis,
                DateToken::Literal("Z".to_string()),
            ],
        }
    }
}

fn parse_tokens(format_str: &str, base_offset: usize) -> Result<Vec<DateToken>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = format_str.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }
        let offset = base_offset + idx;
        let token = match chars.next() {
            Some((_, 'Y')) => DateToken::Year,
            Some((_, 'm')) => DateToken::Month,
            Some((_, 'd')) => DateToken::Day,
            Some((_, 'H')) => DateToken::Hour,
            Some((_, 'M')) => DateToken::Minute,
            Some((_, 'S')) => DateToken::Second,
            Some((_, 's')) => DateToken::UnixSeconds,
            Some((_, '%')) => {
                literal.push('%');
                continue;
            }
            Some((_, digit @ ('3' | '6'))) => match chars.next() {
                Some((_, 'f')) if digit == '3' => DateToken::Millis,
                Some((_, 'f')) => DateToken::Micros,
                _ => {
                    return Err(LoggerError::pattern_syntax(
                        offset,
                        format!("expected 'f' after '%{}' in timestamp format", digit),
                    ))
                }
            },
            Some((_, other)) => {
                return Err(LoggerError::pattern_syntax(
                    offset,
                    format!("unknown timestamp specifier '%{}'", other),
                ))
            }
            None => {
                return Err(LoggerError::pattern_syntax(
                    offset,
                    "dangling '%' in timestamp format",
                ))
            }
        };
        if !literal.is_empty() {
            tokens.push(DateToken::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(token);
    }
    if !literal.is_empty() {
        tokens.push(DateToken::Literal(literal));
    }
    Ok(tokens)
}
