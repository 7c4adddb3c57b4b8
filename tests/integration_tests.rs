//! Integration tests for the logging runtime
//!
//! These tests verify:
//! - Threshold filtering and pattern rendering end to end
//! - Per-logger routing to TCP/UDP with root fallback
//! - Failed reloads keep the previous snapshot
//! - Transport failure isolation
//! - File transport output
//! - Configuration error reporting

use parking_lot::Mutex;
use rust_layout_logger::prelude::*;
use rust_layout_logger::{info, warn};
use std::fs;
use std::io::{BufRead, BufReader};
use std::net::{TcpListener, UdpSocket};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct CaptureAppender {
    lines: Mutex<Vec<String>>,
}

impl CaptureAppender {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Appender for CaptureAppender {
    fn write(&self, _level: LogLevel, bytes: &[u8]) -> Result<()> {
        self.lines
            .lock()
            .push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// Simulates a transport whose descriptor has been closed
struct ClosedAppender;

impl Appender for ClosedAppender {
    fn write(&self, _level: LogLevel, _bytes: &[u8]) -> Result<()> {
        Err(LoggerError::transport("file_appender", "Bad file descriptor"))
    }

    fn name(&self) -> &str {
        "closed"
    }
}

fn with_console_capture() -> (ConfigurationManager, Arc<CaptureAppender>) {
    let capture = Arc::new(CaptureAppender::default());
    let manager = ConfigurationManager::new().with_appender(AppenderKind::Console, capture.clone());
    (manager, capture)
}

#[test]
fn test_root_threshold_and_pattern() {
    let (manager, console) = with_console_capture();
    manager
        .load(
            &LogConfig::new("%p %m%n")
                .console("stdout")
                .root(LogLevel::Info, &[AppenderKind::Console]),
        )
        .expect("Failed to load configuration");

    manager.log("root", LogLevel::Debug, "x", &[]);
    assert!(console.take().is_empty(), "DEBUG must be filtered at INFO");

    manager.log("root", LogLevel::Info, "hello", &[]);
    assert_eq!(console.take(), vec!["INFO hello\n"]);
}

#[test]
fn test_named_logger_routes_to_network_only() {
    let tcp_listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind TCP listener");
    let tcp_port = tcp_listener.local_addr().unwrap().port();
    let udp_receiver = UdpSocket::bind("127.0.0.1:0").expect("Failed to bind UDP receiver");
    udp_receiver
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let udp_port = udp_receiver.local_addr().unwrap().port();

    let (manager, console) = with_console_capture();
    let json = format!(
        r#"{{
            "layout_pattern": "%c %p %m%n",
            "appenders": {{
                "console_appender": {{ "out_stream": "stdout" }},
                "tcp_appender": {{ "local_addr": "127.0.0.1", "port": 0,
                                   "remote_addr": "127.0.0.1", "remote_port": {tcp_port} }},
                "udp_appender": {{ "local_addr": "127.0.0.1", "port": 0,
                                   "remote_addr": "127.0.0.1", "remote_port": {udp_port} }}
            }},
            "layouts": [
                {{ "name": "net", "log_level": "info", "appenders": ["tcp_appender", "udp_appender"] }}
            ],
            "root_layout": {{ "log_level": "info", "appenders": ["console_appender"] }}
        }}"#
    );
    manager.load_json(&json).expect("Failed to load configuration");

    info!(manager, "net", "packet {}", 1);
    assert!(console.take().is_empty(), "net must never reach the console");

    let (stream, _) = tcp_listener.accept().expect("TCP appender never connected");
    let mut line = String::new();
    BufReader::new(stream)
        .read_line(&mut line)
        .expect("Failed to read TCP line");
    assert_eq!(line, "net INFO packet 1\n");

    let mut datagram = [0u8; 128];
    let (n, _) = udp_receiver
        .recv_from(&mut datagram)
        .expect("No UDP datagram received");
    assert_eq!(&datagram[..n], b"net INFO packet 1\n");

    info!(manager, "other", "fallback");
    assert_eq!(console.take(), vec!["other INFO fallback\n"]);
}

#[test]
fn test_failed_reload_keeps_previous_pattern() {
    let (manager, console) = with_console_capture();
    let good = LogConfig::new("%-5p|%m")
        .console("stdout")
        .root(LogLevel::Info, &[AppenderKind::Console]);
    manager.load(&good).unwrap();

    let mut bad = good.clone();
    bad.layout_pattern = "%-5p|%m %".to_string();
    let err = manager.reload(&bad).unwrap_err();
    assert!(matches!(err, LoggerError::PatternSyntax { .. }));
    assert_eq!(manager.state(), ManagerState::Ready);

    warn!(manager, "root", "x");
    assert_eq!(console.take(), vec!["WARN |x"]);
}

#[test]
fn test_failing_appender_does_not_block_others() {
    let (manager, console) = with_console_capture();
    let manager = manager.with_appender(AppenderKind::File, Arc::new(ClosedAppender));
    manager
        .load(
            &LogConfig::new("%m")
                .console("stdout")
                .file("unused.log")
                .root(LogLevel::Info, &[AppenderKind::Console, AppenderKind::File]),
        )
        .unwrap();

    for i in 0..3 {
        manager.log("root", LogLevel::Error, "attempt {}", &[&i]);
    }

    assert_eq!(console.take(), vec!["attempt 0", "attempt 1", "attempt 2"]);
    assert_eq!(manager.metrics().write_failures(AppenderKind::File), 3);
    assert_eq!(manager.metrics().write_failures(AppenderKind::Console), 0);
    assert_eq!(manager.metrics().total_dispatched(), 3);
}

#[test]
fn test_file_transport() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("nested").join("app.log");

    let manager = ConfigurationManager::new();
    manager
        .load(
            &LogConfig::new("%d{UNIX} %-5p %c - %m%n")
                .file(&log_file)
                .logger("db", LogLevel::Debug, &[AppenderKind::File])
                .root(LogLevel::Warn, &[AppenderKind::File]),
        )
        .expect("Failed to load configuration");

    let db = manager.logger("db");
    db.debug("query planned");
    db.trace("filtered");
    manager.logger("web").info("filtered too");
    manager.logger("web").error("boom");
    manager.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("DEBUG db - query planned"), "{}", lines[0]);
    assert!(lines[1].ends_with("ERROR web - boom"), "{}", lines[1]);

    let seconds = lines[0].split(' ').next().unwrap();
    assert!(seconds.parse::<u64>().is_ok(), "UNIX timestamp expected, got {}", seconds);
}

#[test]
fn test_reload_reuses_appender_instance() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("reload.log");

    let manager = ConfigurationManager::new();
    let config = LogConfig::new("%m%n")
        .file(&log_file)
        .root(LogLevel::Info, &[AppenderKind::File]);
    manager.load(&config).unwrap();
    manager.log_str("root", LogLevel::Info, "first");

    let before = manager.snapshot().unwrap();
    let mut next = config.clone();
    next.layout_pattern = "[%p] %m%n".to_string();
    manager.reload(&next).unwrap();
    manager.log_str("root", LogLevel::Info, "second");

    let after = manager.snapshot().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(Arc::ptr_eq(&before.root().targets()[0].1, &after.root().targets()[0].1));

    manager.flush().unwrap();
    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content, "first\n[INFO] second\n");
}

#[test]
fn test_configuration_errors() {
    let manager = ConfigurationManager::new();

    let err = manager
        .load(&LogConfig::new("%m").console("stdout"))
        .unwrap_err();
    assert!(matches!(err, LoggerError::MissingRootLogger));

    let err = manager
        .load(
            &LogConfig::new("%m")
                .console("stdout")
                .logger("a", LogLevel::Info, &[])
                .logger("a", LogLevel::Info, &[])
                .root(LogLevel::Info, &[]),
        )
        .unwrap_err();
    assert!(matches!(err, LoggerError::DuplicateLogger { .. }));

    let err = manager
        .load(&LogConfig::new("%m").root(LogLevel::Info, &[AppenderKind::Udp]))
        .unwrap_err();
    assert!(matches!(err, LoggerError::UnconfiguredAppender { .. }));

    let err = manager
        .load(
            &LogConfig::new("%m")
                .console("stdlog")
                .root(LogLevel::Info, &[AppenderKind::Console]),
        )
        .unwrap_err();
    assert!(matches!(err, LoggerError::InvalidStreamName { .. }));

    let err = manager
        .load_json(r#"{ "layout_pattern": "%m", "root_layout": { "log_level": "loud" } }"#)
        .unwrap_err();
    assert!(err.is_config_error());

    assert_eq!(manager.state(), ManagerState::Uninitialized);
    assert_eq!(manager.metrics().reload_failures(), 5);
}

#[test]
fn test_config_json_roundtrip() {
    let config = LogConfig::new("%d [%t] %-5p %c - %m%n")
        .console("stderr")
        .udp(UdpAppenderConfig::new("0.0.0.0", 0, "127.0.0.1", 9444))
        .logger("net", LogLevel::Debug, &[AppenderKind::Udp, AppenderKind::Console])
        .root(LogLevel::Info, &[AppenderKind::Console]);

    let json = config.to_json_string().unwrap();
    assert!(json.contains(r#""console_appender""#));
    assert!(json.contains(r#""debug""#));

    let reparsed = LogConfig::from_json_str(&json).unwrap();
    assert_eq!(reparsed, config);
}
