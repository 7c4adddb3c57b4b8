//! Logger configuration registry
//!
//! A [`Registry`] is an immutable snapshot built from a [`LogConfig`]: every
//! logger name maps to a [`LoggerEntry`] whose appender references were
//! resolved at build time. A reload builds a fresh registry; published
//! registries are never mutated.

use super::appender::Appender;
use super::appender_set::{AppenderKind, AppenderSet};
use super::config::{LogConfig, LoggerConfig, ROOT_LOGGER_NAME};
use super::error::{LoggerError, Result};
use super::layout::LayoutPattern;
use super::log_level::LogLevel;
use super::slots::AppenderSlots;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Resolved configuration for one logger name
pub struct LoggerEntry {
    name: String,
    threshold: LogLevel,
    appenders: AppenderSet,
    pattern: Arc<LayoutPattern>,
    targets: Vec<(AppenderKind, Arc<dyn Appender>)>,
}

impl LoggerEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn appenders(&self) -> AppenderSet {
        self.appenders
    }

    pub fn pattern(&self) -> &Arc<LayoutPattern> {
        &self.pattern
    }

    /// Records at or above the threshold pass.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.threshold)
    }

    /// Appender instances in dispatch order
    pub fn targets(&self) -> &[(AppenderKind, Arc<dyn Appender>)] {
        &self.targets
    }

    pub fn to_config(&self, global_pattern: &str) -> LoggerConfig {
        let config = LoggerConfig::new(&self.name, self.threshold, self.appenders);
        if self.pattern.source() == global_pattern {
            config
        } else {
            config.with_pattern(self.pattern.source())
        }
    }
}

impl fmt::Debug for LoggerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerEntry")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("appenders", &self.appenders.names())
            .field("pattern", &self.pattern.source())
            .finish()
    }
}

#[derive(Debug)]
pub struct Registry {
    loggers: HashMap<String, Arc<LoggerEntry>>,
    root: Arc<LoggerEntry>,
    config: LogConfig,
}

impl Registry {
    /// Validate `config` and build a snapshot, acquiring appenders from `slots`.
    ///
    /// All validation (root presence, duplicate names, appender references,
    /// pattern syntax, appender settings) happens before any transport is
    /// constructed.
    pub fn build(config: &LogConfig, slots: &AppenderSlots) -> Result<Self> {
        let root_config = config
            .root_layout
            .as_ref()
            .ok_or(LoggerError::MissingRootLogger)?;

        let mut patterns: HashMap<&str, Arc<LayoutPattern>> = HashMap::new();
        patterns.insert(
            config.layout_pattern.as_str(),
            Arc::new(LayoutPattern::compile(&config.layout_pattern)?),
        );

        let declared = config.appenders.declared();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(ROOT_LOGGER_NAME);

        let named = config.layouts.iter().map(|logger| (logger.name.as_str(), logger));
        let all = std::iter::once((ROOT_LOGGER_NAME, root_config)).chain(named.clone());

        for (index, (name, _)) in named.enumerate() {
            if name.is_empty() {
                return Err(LoggerError::config(
                    "layouts",
                    format!("entry {} has an empty name", index),
                ));
            }
            if !seen.insert(name) {
                return Err(LoggerError::DuplicateLogger {
                    name: name.to_string(),
                });
            }
        }

        for (name, logger) in all.clone() {
            if let Some(kind) = logger.appenders.iter().find(|kind| !declared.contains(*kind)) {
                return Err(LoggerError::unconfigured_appender(name, kind.name()));
            }
            if let Some(ref source) = logger.layout_pattern {
                if !patterns.contains_key(source.as_str()) {
                    patterns.insert(source.as_str(), Arc::new(LayoutPattern::compile(source)?));
                }
            }
        }

        // Declared kinds are checked even when unused or already live
        config.appenders.validate()?;

        let used = all.clone().fold(AppenderSet::empty(), |set, (_, logger)| {
            logger.appenders.iter().fold(set, AppenderSet::with)
        });
        let mut instances: HashMap<AppenderKind, Arc<dyn Appender>> = HashMap::new();
        for kind in used.iter() {
            if let Some(settings) = config.appenders.settings(kind) {
                instances.insert(kind, slots.get_or_init(&settings)?);
            }
        }

        let mut entries = all.map(|(name, logger)| {
            let source = logger
                .layout_pattern
                .as_deref()
                .unwrap_or(config.layout_pattern.as_str());
            let targets = logger
                .appenders
                .iter()
                .filter_map(|kind| instances.get(&kind).map(|a| (kind, Arc::clone(a))))
                .collect();
            Arc::new(LoggerEntry {
                name: name.to_string(),
                threshold: logger.log_level,
                appenders: logger.appenders,
                pattern: Arc::clone(&patterns[source]),
                targets,
            })
        });

        let root = entries.next().ok_or(LoggerError::MissingRootLogger)?;
        let loggers = entries
            .map(|entry| (entry.name.clone(), entry))
            .collect();

        let mut config = config.clone();
        if let Some(ref mut root_layout) = config.root_layout {
            root_layout.name = ROOT_LOGGER_NAME.to_string();
        }

        Ok(Self {
            loggers,
            root,
            config,
        })
    }

    /// Exact-name lookup, falling back to the root entry
    #[inline]
    pub fn resolve(&self, name: &str) -> &Arc<LoggerEntry> {
        if name == ROOT_LOGGER_NAME {
            return &self.root;
        }
        self.loggers.get(name).unwrap_or(&self.root)
    }

    /// Exact-name lookup without fallback
    pub fn get(&self, name: &str) -> Option<&Arc<LoggerEntry>> {
        if name == ROOT_LOGGER_NAME {
            return Some(&self.root);
        }
        self.loggers.get(name)
    }

    pub fn root(&self) -> &Arc<LoggerEntry> {
        &self.root
    }

    /// Names of explicitly configured loggers, root excluded
    pub fn logger_names(&self) -> impl Iterator<Item = &str> {
        self.loggers.keys().map(String::as_str)
    }

    /// Configuration this snapshot was built from, root name normalized
    pub fn config(&self) -> &LogConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TcpAppenderConfig;

    fn base() -> LogConfig {
        LogConfig::new("%p %m%n").console("stderr")
    }

    #[test]
    fn test_resolve_exact_or_root() {
        let config = base()
            .logger("net", LogLevel::Debug, &[AppenderKind::Console])
            .root(LogLevel::Info, &[AppenderKind::Console]);
        let registry = Registry::build(&config, &AppenderSlots::new()).unwrap();

        assert_eq!(registry.resolve("net").name(), "net");
        assert_eq!(registry.resolve("net").threshold(), LogLevel::Debug);
        assert_eq!(registry.resolve("other").name(), "root");
        assert_eq!(registry.resolve("root").name(), "root");
        // No prefix matching
        assert_eq!(registry.resolve("net.sub").name(), "root");
        assert!(registry.get("other").is_none());
        assert_eq!(registry.logger_names().collect::<Vec<_>>(), vec!["net"]);
    }

    #[test]
    fn test_missing_root() {
        let config = base().logger("net", LogLevel::Debug, &[]);
        let err = Registry::build(&config, &AppenderSlots::new()).unwrap_err();
        assert!(matches!(err, LoggerError::MissingRootLogger));
    }

    #[test]
    fn test_duplicate_names() {
        let config = base()
            .logger("net", LogLevel::Debug, &[])
            .logger("net", LogLevel::Info, &[])
            .root(LogLevel::Info, &[]);
        let err = Registry::build(&config, &AppenderSlots::new()).unwrap_err();
        assert!(matches!(err, LoggerError::DuplicateLogger { ref name } if name == "net"));

        let config = base()
            .logger("root", LogLevel::Debug, &[])
            .root(LogLevel::Info, &[]);
        let err = Registry::build(&config, &AppenderSlots::new()).unwrap_err();
        assert!(matches!(err, LoggerError::DuplicateLogger { .. }));
    }

    #[test]
    fn test_unconfigured_appender() {
        let config = base()
            .logger("net", LogLevel::Debug, &[AppenderKind::Tcp])
            .root(LogLevel::Info, &[AppenderKind::Console]);
        let slots = AppenderSlots::new();
        let err = Registry::build(&config, &slots).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::UnconfiguredAppender { ref logger, ref kind }
                if logger == "net" && kind == "tcp_appender"
        ));
        // Validation failed before any transport was acquired
        assert!(slots.get(AppenderKind::Console).is_none());
    }

    #[test]
    fn test_declared_settings_validated_before_transport() {
        let config = base()
            .tcp(TcpAppenderConfig::new("127.0.0.1", 0, "no such host!", 9))
            .root(LogLevel::Info, &[AppenderKind::Console]);
        let slots = AppenderSlots::new();
        let err = Registry::build(&config, &slots).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidAddress { ref value, .. } if value == "no such host!"));
        assert!(slots.get(AppenderKind::Console).is_none());
    }

    #[test]
    fn test_bad_stream_rejected_for_live_kind() {
        let slots = AppenderSlots::new();
        let good = base().root(LogLevel::Info, &[AppenderKind::Console]);
        let live = Registry::build(&good, &slots).unwrap();
        assert_eq!(live.root().targets().len(), 1);

        let bad = LogConfig::new("%m")
            .console("stdlog")
            .root(LogLevel::Info, &[AppenderKind::Console]);
        let err = Registry::build(&bad, &slots).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidStreamName { ref name } if name == "stdlog"));
    }

    #[test]
    fn test_bad_pattern() {
        let config = LogConfig::new("%q").root(LogLevel::Info, &[]);
        let err = Registry::build(&config, &AppenderSlots::new()).unwrap_err();
        assert!(matches!(err, LoggerError::PatternSyntax { offset: 1, .. }));

        let mut config = base().root(LogLevel::Info, &[]);
        config.layouts.push(LoggerConfig::new("x", LogLevel::Info, AppenderSet::empty()).with_pattern("%"));
        assert!(Registry::build(&config, &AppenderSlots::new()).is_err());
    }

    #[test]
    fn test_patterns_are_shared() {
        let mut config = base()
            .logger("a", LogLevel::Info, &[])
            .root(LogLevel::Info, &[]);
        config
            .layouts
            .push(LoggerConfig::new("b", LogLevel::Info, AppenderSet::empty()).with_pattern("%m"));
        config
            .layouts
            .push(LoggerConfig::new("c", LogLevel::Info, AppenderSet::empty()).with_pattern("%m"));
        let registry = Registry::build(&config, &AppenderSlots::new()).unwrap();

        assert!(Arc::ptr_eq(registry.resolve("a").pattern(), registry.root().pattern()));
        assert!(Arc::ptr_eq(registry.resolve("b").pattern(), registry.resolve("c").pattern()));
        assert_eq!(registry.resolve("b").pattern().source(), "%m");
    }

    #[test]
    fn test_targets_follow_dispatch_order() {
        let config = base()
            .file(std::env::temp_dir().join("rust_layout_logger_registry_test.log"))
            .root(LogLevel::Info, &[AppenderKind::File, AppenderKind::Console]);
        let registry = Registry::build(&config, &AppenderSlots::new()).unwrap();

        let kinds: Vec<_> = registry.root().targets().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![AppenderKind::Console, AppenderKind::File]);
    }

    #[test]
    fn test_entry_config_roundtrip() {
        let config = base()
            .logger("net", LogLevel::Warn, &[AppenderKind::Console])
            .root(LogLevel::Info, &[AppenderKind::Console]);
        let registry = Registry::build(&config, &AppenderSlots::new()).unwrap();

        let entry_config = registry.resolve("net").to_config(&config.layout_pattern);
        let json = serde_json::to_string(&entry_config).unwrap();
        let reparsed: LoggerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed.appenders, registry.resolve("net").appenders());
        assert_eq!(reparsed.log_level, LogLevel::Warn);
        assert_eq!(reparsed.layout_pattern, None);
    }
}
