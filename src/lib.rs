//! # Rust Layout Logger
//!
//! A configuration-driven logging runtime: each logger name resolves to a
//! severity threshold, a compiled layout pattern and a set of transports.
//!
//! ## Features
//!
//! - **Bounded Rendering**: lines are rendered into a fixed stack buffer with
//!   no heap allocation on the hot path; overlong lines are truncated
//! - **Multiple Transports**: console, file, TCP and UDP appenders, one
//!   shared instance per kind
//! - **Lock-free Lookups**: configuration snapshots are published with an
//!   atomic swap; reloads never disturb in-flight log calls
//! - **Failure Isolation**: a failing transport never blocks the others and
//!   never reaches the caller
//!
//! ## Example
//!
//! ```no_run
//! use rust_layout_logger::prelude::*;
//! use rust_layout_logger::info;
//!
//! let manager = ConfigurationManager::global();
//! manager
//!     .load_json(
//!         r#"{
//!             "layout_pattern": "%d [%t] %-5p %c - %m%n",
//!             "appenders": { "console_appender": { "out_stream": "stdout" } },
//!             "root_layout": { "log_level": "info", "appenders": ["console_appender"] }
//!         }"#,
//!     )
//!     .unwrap();
//!
//! info!(manager, "app", "listening on port {}", 8080);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, TcpAppender, UdpAppender};
    pub use crate::core::{
        Appender, AppenderKind, AppenderSet, ConfigurationManager, LayoutPattern, LogConfig,
        LogLevel, Logger, LoggerConfig, LoggerError, LoggerMetrics, ManagerState, Result,
        TcpAppenderConfig, TimestampFormat, TransportAddress, UdpAppenderConfig,
    };
}

pub use appenders::{ConsoleAppender, ConsoleStream, FileAppender, TcpAppender, UdpAppender};
pub use core::{
    Appender, AppenderKind, AppenderSet, ConfigurationManager, LayoutPattern, LogConfig, LogLevel,
    Logger, LoggerConfig, LoggerEntry, LoggerError, LoggerMetrics, ManagerState, Message, Record,
    Result, TimestampFormat, TransportAddress, LOG_LINE_MAX,
};
