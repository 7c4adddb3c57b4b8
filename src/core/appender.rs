//! Appender trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// Writer for one concrete transport.
///
/// Implementations own their transport handle behind their own lock, so writes
/// to one appender are serialized while different appenders proceed
/// independently. `bytes` is an already rendered line.
pub trait Appender: Send + Sync {
    fn write(&self, level: LogLevel, bytes: &[u8]) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
