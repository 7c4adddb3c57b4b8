//! Console appender implementation

use crate::core::{Appender, LogLevel, LoggerError, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::str::FromStr;

/// Standard stream a console appender writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl FromStr for ConsoleStream {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stdout" => Ok(ConsoleStream::Stdout),
            "stderr" => Ok(ConsoleStream::Stderr),
            _ => Err(LoggerError::InvalidStreamName {
                name: s.to_string(),
            }),
        }
    }
}

/// Writes rendered lines to stdout or stderr.
///
/// Each line goes out in one `write_all` followed by a flush, so no bytes
/// linger in the standard library's line buffer.
pub struct ConsoleAppender {
    stream: ConsoleStream,
    lock: Mutex<()>,
}

impl ConsoleAppender {
    /// Resolve `out_stream` (`"stdout"` or `"stderr"`)
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_layout_logger::appenders::ConsoleAppender;
    ///
    /// assert!(ConsoleAppender::new("stderr").is_ok());
    /// assert!(ConsoleAppender::new("stdin").is_err());
    /// ```
    pub fn new(out_stream: &str) -> Result<Self> {
        Ok(Self::with_stream(out_stream.parse()?))
    }

    pub fn with_stream(stream: ConsoleStream) -> Self {
        Self {
            stream,
            lock: Mutex::new(()),
        }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    fn write_to<W: Write>(mut out: W, bytes: &[u8]) -> io::Result<()> {
        out.write_all(bytes)?;
        out.flush()
    }
}

impl Appender for ConsoleAppender {
    fn write(&self, _level: LogLevel, bytes: &[u8]) -> Result<()> {
        let _guard = self.lock.lock();
        let result = match self.stream {
            ConsoleStream::Stdout => Self::write_to(io::stdout().lock(), bytes),
            ConsoleStream::Stderr => Self::write_to(io::stderr().lock(), bytes),
        };
        result.map_err(|e| LoggerError::transport(self.name(), e.to_string()))
    }

    fn flush(&self) -> Result<()> {
        let _guard = self.lock.lock();
        match self.stream {
            ConsoleStream::Stdout => io::stdout().flush()?,
            ConsoleStream::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console_appender"
    }
}
