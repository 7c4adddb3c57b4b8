//! Named logger handle

use super::log_level::LogLevel;
use super::manager::ConfigurationManager;
use super::registry::LoggerEntry;
use super::error::Result;
use std::fmt;
use std::sync::Arc;

/// A logger name bound to a manager.
///
/// The handle holds no configuration of its own: every call resolves `name`
/// against whichever snapshot is published at that moment, so a handle keeps
/// working across reloads.
#[derive(Debug, Clone, Copy)]
pub struct Logger<'a> {
    manager: &'a ConfigurationManager,
    name: &'a str,
}

impl<'a> Logger<'a> {
    pub fn new(manager: &'a ConfigurationManager, name: &'a str) -> Self {
        Self { manager, name }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Entry this name currently resolves to
    pub fn entry(&self) -> Result<Arc<LoggerEntry>> {
        self.manager.resolve(self.name)
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.manager.is_enabled(self.name, level)
    }

    #[inline]
    pub fn log(&self, level: LogLevel, format: &str, args: &[&dyn fmt::Display]) {
        self.manager.log(self.name, level, format, args);
    }

    #[inline]
    pub fn log_args(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.manager.log_args(self.name, level, args);
    }

    #[inline]
    pub fn trace(&self, message: &str) {
        self.manager.log_str(self.name, LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: &str) {
        self.manager.log_str(self.name, LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: &str) {
        self.manager.log_str(self.name, LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: &str) {
        self.manager.log_str(self.name, LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: &str) {
        self.manager.log_str(self.name, LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: &str) {
        self.manager.log_str(self.name, LogLevel::Fatal, message);
    }
}
