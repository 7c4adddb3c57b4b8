//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown severity level name
    #[error("Invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// Malformed transport address
    #[error("Invalid address '{value}': {message}")]
    InvalidAddress { value: String, message: String },

    /// Layout pattern could not be compiled
    #[error("Pattern syntax error at offset {offset}: {message}")]
    PatternSyntax { offset: usize, message: String },

    /// Console appender stream name other than stdout/stderr
    #[error("Invalid console out_stream '{name}', valid names: stdout, stderr")]
    InvalidStreamName { name: String },

    /// File appender could not open its path
    #[error("Failed to open log file '{path}'")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Network appender failed to acquire its socket
    #[error("Failed to initialize {kind}")]
    AppenderInit {
        kind: String,
        #[source]
        source: std::io::Error,
    },

    /// Logger references an appender kind with no global configuration
    #[error("Logger '{logger}' references unconfigured appender '{kind}'")]
    UnconfiguredAppender { logger: String, kind: String },

    /// Two logger entries share a name
    #[error("Duplicate logger name '{name}'")]
    DuplicateLogger { name: String },

    /// Configuration has no root_layout entry
    #[error("Configuration is missing the mandatory root_layout entry")]
    MissingRootLogger,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Transport write failure (swallowed by dispatch)
    #[error("{kind} write failed: {message}")]
    Transport { kind: String, message: String },

    /// No configuration has been loaded yet
    #[error("Logger configuration has not been loaded")]
    NotInitialized,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    pub fn invalid_address(value: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidAddress {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn pattern_syntax(offset: usize, message: impl Into<String>) -> Self {
        LoggerError::PatternSyntax {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn unconfigured_appender(logger: impl Into<String>, kind: impl Into<String>) -> Self {
        LoggerError::UnconfiguredAppender {
            logger: logger.into(),
            kind: kind.into(),
        }
    }

    /// Create a transport write error
    pub fn transport(kind: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Transport {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// True for errors a `load`/`reload` reports as a rejected configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LoggerError::JsonError(_)
                | LoggerError::InvalidLevel { .. }
                | LoggerError::InvalidAddress { .. }
                | LoggerError::PatternSyntax { .. }
                | LoggerError::InvalidStreamName { .. }
                | LoggerError::UnconfiguredAppender { .. }
                | LoggerError::DuplicateLogger { .. }
                | LoggerError::MissingRootLogger
                | LoggerError::InvalidConfiguration { .. }
        )
    }
}
