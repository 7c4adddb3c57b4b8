//! Layout pattern compiler and bounded renderer
//!
//! A pattern such as `"%d [%t] %-5p %c - %m%n"` is compiled once into a token
//! list. Rendering writes a [`Record`] into a caller-owned byte slice and never
//! allocates: output that does not fit is cut at the slice boundary.
//!
//! Directives take the form `%[-][width]X`:
//!
//! | Directive | Output                                        |
//! |-----------|-----------------------------------------------|
//! | `%d`      | timestamp, optional `{format}` (see [`TimestampFormat`]) |
//! | `%t`      | calling thread id                             |
//! | `%p`      | level name (`INFO`, `WARN`, ...)              |
//! | `%c`      | logger name                                   |
//! | `%m`      | formatted message                             |
//! | `%n`      | newline                                       |
//! | `%%`      | literal `%`                                   |
//!
//! With a width, `-` pads on the right and no `-` pads on the left. A field
//! longer than its width is cut to the width.

use super::error::{LoggerError, Result};
use super::record::{Message, Record};
use super::timestamp::TimestampFormat;
use std::fmt::{self, Write};

/// Capacity of the stack buffer a log call renders into.
pub const LOG_LINE_MAX: usize = 1024;

/// Largest width accepted on a padded field.
pub const MAX_FIELD_WIDTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldWidth {
    width: usize,
    align: Align,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Literal(String),
    Timestamp(TimestampFormat),
    ThreadId,
    Level,
    LoggerName,
    Message,
    Newline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    directive: Directive,
    width: Option<FieldWidth>,
}

/// Compiled, immutable layout pattern
///
/// # Example
///
/// ```
/// use rust_layout_logger::core::{LayoutPattern, LogLevel, Message, Record};
///
/// let pattern = LayoutPattern::compile("%-5p|%m").unwrap();
/// let record = Record::new(LogLevel::Warn, "root", Message::text("x"));
///
/// let mut buf = [0u8; 64];
/// let len = pattern.render(&record, &mut buf);
/// assert_eq!(&buf[..len], b"WARN |x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPattern {
    source: String,
    tokens: Vec<Token>,
}

impl LayoutPattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }

            let align = if matches!(chars.peek(), Some((_, '-'))) {
                chars.next();
                Align::Left
            } else {
                Align::Right
            };
            let mut width: Option<usize> = None;
            while let Some(&(idx, digit)) = chars.peek() {
                let Some(value) = digit.to_digit(10) else {
                    break;
                };
                chars.next();
                let next = width.unwrap_or(0) * 10 + value as usize;
                if next > MAX_FIELD_WIDTH {
                    return Err(LoggerError::pattern_syntax(
                        idx,
                        format!("field width exceeds {}", MAX_FIELD_WIDTH),
                    ));
                }
                width = Some(next);
            }
            if align == Align::Left && width.is_none() {
                return Err(LoggerError::pattern_syntax(
                    start,
                    "'-' must be followed by a field width",
                ));
            }
            if width == Some(0) {
                return Err(LoggerError::pattern_syntax(start, "field width must be positive"));
            }
            let width = width.map(|width| FieldWidth { width, align });

            let Some((offset, directive_char)) = chars.next() else {
                return Err(LoggerError::pattern_syntax(
                    start,
                    "dangling '%' at end of pattern",
                ));
            };
            let directive = match directive_char {
                '%' | 'n' if width.is_some() => {
                    return Err(LoggerError::pattern_syntax(
                        offset,
                        format!("directive '%{}' does not take a width", directive_char),
                    ));
                }
                '%' => {
                    literal.push('%');
                    continue;
                }
                'd' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        let (brace, _) = chars.next().unwrap_or((offset, '{'));
                        let format_start = brace + 1;
                        let mut format_end = None;
                        for (idx, c) in chars.by_ref() {
                            if c == '}' {
                                format_end = Some(idx);
                                break;
                            }
                        }
                        let Some(format_end) = format_end else {
                            return Err(LoggerError::pattern_syntax(
                                brace,
                                "unterminated '{' in %d directive",
                            ));
                        };
                        Directive::Timestamp(TimestampFormat::compile_at(
                            &pattern[format_start..format_end],
                            format_start,
                        )?)
                    } else {
                        Directive::Timestamp(TimestampFormat::default())
                    }
                }
                't' => Directive::ThreadId,
                'p' => Directive::Level,
                'c' => Directive::LoggerName,
                'm' => Directive::Message,
                'n' => Directive::Newline,
                other => {
                    return Err(LoggerError::pattern_syntax(
                        offset,
                        format!("unknown directive '%{}'", other),
                    ));
                }
            };

            if !literal.is_empty() {
                tokens.push(Token {
                    directive: Directive::Literal(std::mem::take(&mut literal)),
                    width: None,
                });
            }
            tokens.push(Token { directive, width });
        }

        if !literal.is_empty() {
            tokens.push(Token {
                directive: Directive::Literal(literal),
                width: None,
            });
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// Pattern text this layout was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render `record` into `out`, returning the number of bytes written.
    ///
    /// Never writes past `out.len()`; an over-long line is cut at the boundary.
    pub fn render(&self, record: &Record<'_>, out: &mut [u8]) -> usize {
        self.render_checked(record, out).0
    }

    /// Like [`LayoutPattern::render`], also reporting whether output was cut.
    pub fn render_checked(&self, record: &Record<'_>, out: &mut [u8]) -> (usize, bool) {
        let mut writer = SliceWriter::new(out);
        for token in &self.tokens {
            match token.width {
                None => render_directive(&token.directive, record, &mut writer),
                Some(width) => {
                    let mut scratch = [0u8; MAX_FIELD_WIDTH * 4];
                    let mut field = SliceWriter::new(&mut scratch);
                    render_directive(&token.directive, record, &mut field);
                    let len = field.len;
                    write_padded(&scratch[..len], width, &mut writer);
                }
            }
        }
        (writer.len, writer.truncated)
    }
}

fn render_directive(directive: &Directive, record: &Record<'_>, w: &mut SliceWriter<'_>) {
    // SliceWriter::write_str never fails; only user Display impls can
    match directive {
        Directive::Literal(text) => {
            let _ = w.write_str(text);
        }
        Directive::Timestamp(format) => {
            let _ = format.write_to(w, &record.timestamp);
        }
        Directive::ThreadId => {
            let _ = write!(w, "{}", record.thread_id);
        }
        Directive::Level => {
            let _ = w.write_str(record.level.to_str());
        }
        Directive::LoggerName => {
            let _ = w.write_str(record.logger_name);
        }
        Directive::Message => write_message(&record.message, w),
        Directive::Newline => {
            let _ = w.write_char('\n');
        }
    }
}

fn write_message(message: &Message<'_>, w: &mut SliceWriter<'_>) {
    let mark = w.mark();
    match *message {
        Message::Text(text) => {
            let _ = w.write_str(text);
        }
        Message::Template { format, args } => {
            if expand_template(format, args, w).is_err() {
                w.rewind(mark);
                let _ = w.write_str(format);
            }
        }
        Message::Args(args) => {
            if fmt::write(w, args).is_err() {
                w.rewind(mark);
                if let Some(text) = args.as_str() {
                    let _ = w.write_str(text);
                }
            }
        }
    }
}

/// Expand `{}` placeholders in order; `{{` and `}}` are escapes.
///
/// Fails on a stray brace, on a placeholder/argument count mismatch, or when an
/// argument's `Display` fails.
fn expand_template<W: Write>(
    format: &str,
    args: &[&dyn fmt::Display],
    w: &mut W,
) -> fmt::Result {
    let bytes = format.as_bytes();
    let mut args = args.iter();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'{', Some(b'{')) | (b'}', Some(b'}')) => {
                w.write_str(&format[literal_start..=i])?;
                i += 2;
                literal_start = i;
            }
            (b'{', Some(b'}')) => {
                w.write_str(&format[literal_start..i])?;
                let arg = args.next().ok_or(fmt::Error)?;
                write!(w, "{}", arg)?;
                i += 2;
                literal_start = i;
            }
            (b'{', _) | (b'}', _) => return Err(fmt::Error),
            _ => i += 1,
        }
    }
    w.write_str(&format[literal_start..])?;

    if args.next().is_some() {
        return Err(fmt::Error);
    }
    Ok(())
}

fn write_padded(field: &[u8], width: FieldWidth, w: &mut SliceWriter<'_>) {
    let text = match std::str::from_utf8(field) {
        Ok(text) => text,
        // Scratch cut inside a multi-byte char; keep the valid prefix
        Err(e) => std::str::from_utf8(&field[..e.valid_up_to()]).unwrap_or_default(),
    };
    let cut = text
        .char_indices()
        .nth(width.width)
        .map_or(text.len(), |(idx, _)| idx);
    let text = &text[..cut];
    let padding = width.width - text.chars().count();

    if width.align == Align::Right {
        write_spaces(padding, w);
    }
    let _ = w.write_str(text);
    if width.align == Align::Left {
        write_spaces(padding, w);
    }
}

fn write_spaces(count: usize, w: &mut SliceWriter<'_>) {
    const SPACES: &str = "                                ";
    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(SPACES.len());
        let _ = w.write_str(&SPACES[..n]);
        remaining -= n;
    }
}

/// `fmt::Write` over a fixed slice that silently cuts at capacity.
pub(crate) struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> SliceWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            truncated: false,
        }
    }

    fn mark(&self) -> (usize, bool) {
        (self.len, self.truncated)
    }

    fn rewind(&mut self, (len, truncated): (usize, bool)) {
        self.len = len.min(self.len);
        self.truncated = truncated;
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let available = self.buf.len() - self.len;
        let n = available.min(s.len());
        self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;
        if n < s.len() {
            self.truncated = true;
        }
        Ok(())
    }
}
