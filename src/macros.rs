//! Logging macros for ergonomic log message formatting.
//!
//! The arguments are captured with `format_args!` and rendered straight into
//! the line buffer, so a call below the logger threshold costs a lookup and
//! nothing else.
//!
//! # Examples
//!
//! ```no_run
//! use rust_layout_logger::prelude::*;
//! use rust_layout_logger::{error, info};
//!
//! let manager = ConfigurationManager::new();
//! # manager.load(&LogConfig::new("%m%n").console("stdout").root(LogLevel::Info, &[AppenderKind::Console])).unwrap();
//!
//! // Basic logging
//! info!(manager, "server", "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(manager, "server", "Server listening on port {}", port);
//!
//! let code = 500;
//! error!(manager, "http", "request failed with status {code}");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_layout_logger::prelude::*;
/// # let manager = ConfigurationManager::new();
/// use rust_layout_logger::log;
/// log!(manager, "root", LogLevel::Info, "Simple message");
/// log!(manager, "root", LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($manager:expr, $logger:expr, $level:expr, $($arg:tt)+) => {
        $manager.log_args($logger, $level, ::std::format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($manager:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($manager, $logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($manager:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($manager, $logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_layout_logger::prelude::*;
/// # let manager = ConfigurationManager::new();
/// use rust_layout_logger::info;
/// info!(manager, "app", "Application started");
/// info!(manager, "app", "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($manager:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($manager, $logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($manager:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($manager, $logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($manager:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($manager, $logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($manager:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($manager, $logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
