//! Configuration manager: snapshot publication and the logging hot path
//!
//! The manager owns the appender instances and the currently published
//! [`Registry`]. A load builds a complete registry off to the side and
//! publishes it with one atomic pointer swap, so concurrent log calls always
//! see either the previous snapshot or the new one, never a partial build.
//!
//! State machine: `Uninitialized -> Loading -> Ready`, and `Ready -> Loading ->
//! Ready` on reload. A failed load returns to the state it started from.

use super::appender::Appender;
use super::appender_set::AppenderKind;
use super::config::LogConfig;
use super::dispatch::{dispatch, flush_all};
use super::error::{LoggerError, Result};
use super::layout::LOG_LINE_MAX;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::metrics::LoggerMetrics;
use super::record::{Message, Record};
use super::registry::{LoggerEntry, Registry};
use super::slots::AppenderSlots;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ManagerState {
    Uninitialized = 0,
    Loading = 1,
    Ready = 2,
}

impl ManagerState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ManagerState::Loading,
            2 => ManagerState::Ready,
            _ => ManagerState::Uninitialized,
        }
    }
}

/// Owner of the published logger registry and the appender instances
///
/// # Example
///
/// ```no_run
/// use rust_layout_logger::prelude::*;
///
/// let manager = ConfigurationManager::new();
/// manager
///     .load(
///         &LogConfig::new("%p %m%n")
///             .console("stdout")
///             .root(LogLevel::Info, &[AppenderKind::Console]),
///     )
///     .unwrap();
///
/// manager.log("root", LogLevel::Info, "hello {}", &[&"world"]);
/// ```
pub struct ConfigurationManager {
    snapshot: ArcSwapOption<Registry>,
    appenders: AppenderSlots,
    state: AtomicU8,
    reload_lock: Mutex<()>,
    metrics: LoggerMetrics,
}

static GLOBAL: OnceLock<ConfigurationManager> = OnceLock::new();

impl ConfigurationManager {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwapOption::empty(),
            appenders: AppenderSlots::new(),
            state: AtomicU8::new(ManagerState::Uninitialized as u8),
            reload_lock: Mutex::new(()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Process-wide manager, created empty on first use
    pub fn global() -> &'static ConfigurationManager {
        GLOBAL.get_or_init(ConfigurationManager::new)
    }

    /// Seed `kind` with a caller-provided appender instead of building one
    /// from configuration.
    pub fn with_appender(self, kind: AppenderKind, appender: Arc<dyn Appender>) -> Self {
        self.install_appender(kind, appender);
        self
    }

    /// Returns `false` if `kind` already has an instance.
    pub fn install_appender(&self, kind: AppenderKind, appender: Arc<dyn Appender>) -> bool {
        self.appenders.install(kind, appender)
    }

    pub fn state(&self) -> ManagerState {
        ManagerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Build and publish a registry from `config`.
    ///
    /// On error the previously published snapshot, if any, stays in effect.
    pub fn load(&self, config: &LogConfig) -> Result<()> {
        let _guard = self.reload_lock.lock();
        let previous = self.state();
        self.state.store(ManagerState::Loading as u8, Ordering::Release);

        match Registry::build(config, &self.appenders) {
            Ok(registry) => {
                self.snapshot.store(Some(Arc::new(registry)));
                self.state.store(ManagerState::Ready as u8, Ordering::Release);
                self.metrics.record_reload();
                Ok(())
            }
            Err(e) => {
                self.state.store(previous as u8, Ordering::Release);
                Err(self.rejected(e))
            }
        }
    }

    /// Replace the active configuration. Fails with `NotInitialized` before
    /// the first successful [`load`](Self::load).
    pub fn reload(&self, config: &LogConfig) -> Result<()> {
        if self.snapshot.load().is_none() {
            return Err(LoggerError::NotInitialized);
        }
        self.load(config)
    }

    /// Parse a JSON document and [`load`](Self::load) it.
    pub fn load_json(&self, json: &str) -> Result<()> {
        let config = LogConfig::from_json_str(json).map_err(|e| self.rejected(e))?;
        self.load(&config)
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            self.rejected(LoggerError::io_operation(
                "opening configuration",
                path.display().to_string(),
                e,
            ))
        })?;
        let config = LogConfig::from_reader(BufReader::new(file)).map_err(|e| self.rejected(e))?;
        self.load(&config)
    }

    fn rejected(&self, error: LoggerError) -> LoggerError {
        self.metrics.record_reload_failure();
        error
    }

    /// Entry for `name`, or the root entry when `name` is not configured
    pub fn resolve(&self, name: &str) -> Result<Arc<LoggerEntry>> {
        let guard = self.snapshot.load();
        match guard.as_ref() {
            Some(registry) => Ok(Arc::clone(registry.resolve(name))),
            None => Err(LoggerError::NotInitialized),
        }
    }

    pub fn is_enabled(&self, name: &str, level: LogLevel) -> bool {
        let guard = self.snapshot.load();
        guard
            .as_ref()
            .map(|registry| registry.resolve(name).is_enabled(level))
            .unwrap_or(false)
    }

    /// Log a runtime template: each `{}` in `format` takes the next argument.
    pub fn log(&self, name: &str, level: LogLevel, format: &str, args: &[&dyn fmt::Display]) {
        self.emit(name, level, Message::Template { format, args });
    }

    /// Log precompiled arguments, as produced by `format_args!`.
    pub fn log_args(&self, name: &str, level: LogLevel, args: fmt::Arguments<'_>) {
        self.emit(name, level, Message::Args(args));
    }

    /// Log `text` verbatim.
    pub fn log_str(&self, name: &str, level: LogLevel, text: &str) {
        self.emit(name, level, Message::Text(text));
    }

    // Hot path: one atomic snapshot load, a threshold check, one render into a
    // stack buffer, then fan-out. Records logged before the first load are
    // dropped.
    fn emit(&self, name: &str, level: LogLevel, message: Message<'_>) {
        let guard = self.snapshot.load();
        let registry = match guard.as_ref() {
            Some(registry) => registry,
            None => return,
        };

        let entry = registry.resolve(name);
        if !entry.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let record = Record::new(level, name, message);
        let mut line = [0u8; LOG_LINE_MAX];
        let (len, truncated) = entry.pattern().render_checked(&record, &mut line);
        if truncated {
            self.metrics.record_truncated();
        }

        self.metrics.record_dispatched();
        dispatch(entry.targets(), level, &line[..len], &self.metrics);
    }

    /// Handle bound to one logger name
    pub fn logger<'a>(&'a self, name: &'a str) -> Logger<'a> {
        Logger::new(self, name)
    }

    /// Currently published registry
    pub fn snapshot(&self) -> Option<Arc<Registry>> {
        self.snapshot.load_full()
    }

    /// Configuration of the published registry
    pub fn config(&self) -> Option<LogConfig> {
        self.snapshot
            .load()
            .as_ref()
            .map(|registry| registry.config().clone())
    }

    /// Flush every constructed appender.
    pub fn flush(&self) -> Result<()> {
        flush_all(self.appenders.live())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigurationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationManager")
            .field("state", &self.state())
            .field("snapshot", &self.snapshot.load().as_ref().map(|r| r.root().name().to_string()))
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Drop for ConfigurationManager {
    fn drop(&mut self) {
        let _ = flush_all(self.appenders.live());
    }
}
