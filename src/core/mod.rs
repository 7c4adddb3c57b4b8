//! Core logger types and traits

pub mod address;
pub mod appender;
pub mod appender_set;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod log_level;
pub mod logger;
pub mod manager;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod slots;
pub mod timestamp;

pub use address::TransportAddress;
pub use appender::Appender;
pub use appender_set::{AppenderKind, AppenderSet};
pub use config::{
    AppenderSettings, AppendersConfig, ConsoleAppenderConfig, FileAppenderConfig, LogConfig,
    LoggerConfig, TcpAppenderConfig, UdpAppenderConfig, DEFAULT_LAYOUT_PATTERN, ROOT_LOGGER_NAME,
};
pub use dispatch::ALERT_INTERVAL;
pub use error::{LoggerError, Result};
pub use layout::{Align, LayoutPattern, LOG_LINE_MAX, MAX_FIELD_WIDTH};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use manager::{ConfigurationManager, ManagerState};
pub use metrics::LoggerMetrics;
pub use record::{current_thread_id, Message, Record};
pub use registry::{LoggerEntry, Registry};
pub use slots::AppenderSlots;
pub use timestamp::TimestampFormat;
