//! Configuration tree consumed by the configuration manager
//!
//! The tree mirrors the JSON document:
//!
//! ```json
//! {
//!   "layout_pattern": "%d [%t] %-5p %c - %m%n",
//!   "appenders": {
//!     "console_appender": { "out_stream": "stdout" },
//!     "file_appender": { "file_path": "logs/app.log" }
//!   },
//!   "layouts": [
//!     { "name": "net", "log_level": "debug", "appenders": ["file_appender"] }
//!   ],
//!   "root_layout": { "log_level": "info", "appenders": ["console_appender"] }
//! }
//! ```

use super::appender_set::{AppenderKind, AppenderSet};
use super::address::TransportAddress;
use crate::appenders::ConsoleStream;
use super::error::Result;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

pub const DEFAULT_LAYOUT_PATTERN: &str = "%d [%t] %-5p %c - %m%n";

pub const ROOT_LOGGER_NAME: &str = "root";

fn default_layout_pattern() -> String {
    DEFAULT_LAYOUT_PATTERN.to_string()
}

fn default_max_reconnects() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_layout_pattern")]
    pub layout_pattern: String,
    #[serde(default)]
    pub appenders: AppendersConfig,
    #[serde(default, alias = "loggers", skip_serializing_if = "Vec::is_empty")]
    pub layouts: Vec<LoggerConfig>,
    /// Mandatory fallback logger; absence is reported by `load`, not by parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_layout: Option<LoggerConfig>,
}

impl LogConfig {
    /// Empty configuration with the given global pattern and no root entry yet
    pub fn new(layout_pattern: impl Into<String>) -> Self {
        Self {
            layout_pattern: layout_pattern.into(),
            appenders: AppendersConfig::default(),
            layouts: Vec::new(),
            root_layout: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn console(mut self, out_stream: &str) -> Self {
        self.appenders.console_appender = Some(ConsoleAppenderConfig {
            out_stream: out_stream.to_string(),
        });
        self
    }

    #[must_use]
    pub fn file(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.appenders.file_appender = Some(FileAppenderConfig {
            file_path: file_path.into(),
        });
        self
    }

    #[must_use]
    pub fn tcp(mut self, tcp: TcpAppenderConfig) -> Self {
        self.appenders.tcp_appender = Some(tcp);
        self
    }

    #[must_use]
    pub fn udp(mut self, udp: UdpAppenderConfig) -> Self {
        self.appenders.udp_appender = Some(udp);
        self
    }

    #[must_use]
    pub fn logger(mut self, name: &str, log_level: LogLevel, appenders: &[AppenderKind]) -> Self {
        self.layouts
            .push(LoggerConfig::new(name, log_level, appenders.iter().copied().collect()));
        self
    }

    #[must_use]
    pub fn root(mut self, log_level: LogLevel, appenders: &[AppenderKind]) -> Self {
        self.root_layout = Some(LoggerConfig::new(
            ROOT_LOGGER_NAME,
            log_level,
            appenders.iter().copied().collect(),
        ));
        self
    }
}

/// Global appender declarations; at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_appender: Option<ConsoleAppenderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_appender: Option<FileAppenderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_appender: Option<TcpAppenderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_appender: Option<UdpAppenderConfig>,
}

impl AppendersConfig {
    /// Settings declared for `kind`, if any
    pub fn settings(&self, kind: AppenderKind) -> Option<AppenderSettings> {
        match kind {
            AppenderKind::Console => self.console_appender.clone().map(AppenderSettings::Console),
            AppenderKind::File => self.file_appender.clone().map(AppenderSettings::File),
            AppenderKind::Tcp => self.tcp_appender.clone().map(AppenderSettings::Tcp),
            AppenderKind::Udp => self.udp_appender.clone().map(AppenderSettings::Udp),
        }
    }

    /// Check every declared kind's settings without acquiring any transport
    pub fn validate(&self) -> Result<()> {
        AppenderKind::ALL
            .into_iter()
            .filter_map(|kind| self.settings(kind))
            .try_for_each(|settings| settings.validate())
    }

    /// Set of kinds with a declaration
    pub fn declared(&self) -> AppenderSet {
        AppenderKind::ALL
            .into_iter()
            .filter(|kind| self.settings(*kind).is_some())
            .collect()
    }
}

/// Kind-specific settings an appender instance is constructed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppenderSettings {
    Console(ConsoleAppenderConfig),
    File(FileAppenderConfig),
    Tcp(TcpAppenderConfig),
    Udp(UdpAppenderConfig),
}

impl AppenderSettings {
    pub fn kind(&self) -> AppenderKind {
        match self {
            AppenderSettings::Console(_) => AppenderKind::Console,
            AppenderSettings::File(_) => AppenderKind::File,
            AppenderSettings::Tcp(_) => AppenderKind::Tcp,
            AppenderSettings::Udp(_) => AppenderKind::Udp,
        }
    }

    /// Reject stream names and addresses that construction would reject.
    ///
    /// File paths are only checked by opening them.
    pub fn validate(&self) -> Result<()> {
        match self {
            AppenderSettings::Console(config) => {
                config.out_stream.parse::<ConsoleStream>()?;
            }
            AppenderSettings::File(_) => {}
            AppenderSettings::Tcp(config) => {
                config.local()?;
                config.remote()?;
            }
            AppenderSettings::Udp(config) => {
                config.local()?;
                config.remote()?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleAppenderConfig {
    pub out_stream: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAppenderConfig {
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpAppenderConfig {
    pub local_addr: String,
    #[serde(default)]
    pub port: u16,
    pub remote_addr: String,
    pub remote_port: u16,
    /// Reconnect attempts after a failed send, per write
    #[serde(default = "default_max_reconnects")]
    pub max_reconnects: u32,
    /// Connect and write timeout; none means block until the OS gives up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl TcpAppenderConfig {
    pub fn new(local_addr: &str, port: u16, remote_addr: &str, remote_port: u16) -> Self {
        Self {
            local_addr: local_addr.to_string(),
            port,
            remote_addr: remote_addr.to_string(),
            remote_port,
            max_reconnects: default_max_reconnects(),
            timeout_ms: None,
        }
    }

    pub fn local(&self) -> Result<TransportAddress> {
        TransportAddress::new(&self.local_addr, self.port)
    }

    pub fn remote(&self) -> Result<TransportAddress> {
        TransportAddress::new(&self.remote_addr, self.remote_port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdpAppenderConfig {
    pub local_addr: String,
    #[serde(default)]
    pub port: u16,
    pub remote_addr: String,
    pub remote_port: u16,
}

impl UdpAppenderConfig {
    pub fn new(local_addr: &str, port: u16, remote_addr: &str, remote_port: u16) -> Self {
        Self {
            local_addr: local_addr.to_string(),
            port,
            remote_addr: remote_addr.to_string(),
            remote_port,
        }
    }

    pub fn local(&self) -> Result<TransportAddress> {
        TransportAddress::new(&self.local_addr, self.port)
    }

    pub fn remote(&self) -> Result<TransportAddress> {
        TransportAddress::new(&self.remote_addr, self.remote_port)
    }
}

/// One logger entry as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub name: String,
    pub log_level: LogLevel,
    #[serde(default)]
    pub appenders: AppenderSet,
    /// Overrides the global pattern for this logger only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_pattern: Option<String>,
}

impl LoggerConfig {
    pub fn new(name: &str, log_level: LogLevel, appenders: AppenderSet) -> Self {
        Self {
            name: name.to_string(),
            log_level,
            appenders,
            layout_pattern: None,
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.layout_pattern = Some(pattern.to_string());
        self
    }
}
