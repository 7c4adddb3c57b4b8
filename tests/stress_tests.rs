//! Stress tests for concurrent logging and configuration reloads
//!
//! These tests verify:
//! - Log calls racing a reload only ever observe a complete snapshot
//! - Concurrent writers to one file never interleave partial lines
//! - Counters stay consistent under contention

use parking_lot::Mutex;
use rust_layout_logger::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

#[derive(Default)]
struct CaptureAppender {
    lines: Mutex<Vec<String>>,
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

/// Two generations that disagree on every field a torn read could mix
fn generation(tag: &str) -> LogConfig {
    let mut config = LogConfig::new(format!("{}|%c|%m", tag))
        .console("stdout")
        .root(LogLevel::Info, &[AppenderKind::Console]);
    if tag == "A" {
        config.layouts.push(
            LoggerConfig::new(
                "net",
                LogLevel::Trace,
                AppenderSet::empty().with(AppenderKind::Console),
            )
            .with_pattern("A-net|%m"),
        );
    }
    config
}

#[test]
fn test_reload_never_exposes_partial_snapshot() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 2_000;

    let capture = Arc::new(CaptureAppender::default());
    let manager = Arc::new(
        ConfigurationManager::new().with_appender(AppenderKind::Console, capture.clone()),
    );
    manager.load(&generation("A")).unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let reloader = {
        let manager = Arc::clone(&manager);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut reloads = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let tag = if reloads % 2 == 0 { "B" } else { "A" };
                manager.reload(&generation(tag)).expect("reload failed");
                reloads += 1;
            }
            reloads
        })
    };

    let barrier = Arc::new(Barrier::new(WRITERS));
    let writers: Vec<_> = (0..WRITERS)
        .map(|i| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..PER_WRITER {
                    // Trace only passes under generation A's "net" entry
                    manager.log("net", LogLevel::Trace, "t{}-{}", &[&i, &j]);
                    manager.log("net", LogLevel::Info, "i{}-{}", &[&i, &j]);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().expect("Writer thread panicked");
    }
    stop.store(true, Ordering::Relaxed);
    let reloads = reloader.join().expect("Reloader thread panicked");
    assert!(reloads > 0);

    let lines = capture.lines.lock();
    for line in lines.iter() {
        let consistent = line.starts_with("A-net|") || line.starts_with("B|net|");
        assert!(consistent, "line from a mixed snapshot: {:?}", line);
        if line.starts_with("B|") {
            assert!(!line.contains("|t"), "trace passed generation B: {:?}", line);
        }
    }

    // Every INFO call passes under both generations
    let infos = lines.iter().filter(|l| l.contains("|i")).count();
    assert_eq!(infos, WRITERS * PER_WRITER);

    let metrics = manager.metrics();
    assert_eq!(metrics.total_dispatched() as usize, lines.len());
    assert_eq!(
        (metrics.total_dispatched() + metrics.filtered_count()) as usize,
        WRITERS * PER_WRITER * 2
    );
}

#[test]
fn test_concurrent_file_writes_keep_lines_whole() {
    const WRITERS: usize = 6;
    const PER_WRITER: usize = 500;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let manager = Arc::new(ConfigurationManager::new());
    manager
        .load(
            &LogConfig::new("[%t] %-5p %m%n")
                .file(&log_file)
                .root(LogLevel::Debug, &[AppenderKind::File]),
        )
        .unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let logger = manager.logger("worker");
                for j in 0..PER_WRITER {
                    logger.log(LogLevel::Debug, "writer {} message {} {}", &[&i, &j, &"x".repeat(64)]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Writer thread panicked");
    }
    manager.flush().unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), WRITERS * PER_WRITER);

    let mut seen = HashSet::new();
    let mut thread_ids = HashSet::new();
    for line in &lines {
        assert!(line.ends_with(&"x".repeat(64)), "partial line: {:?}", line);
        let (tid, rest) = line.split_once("] ").expect("missing thread id");
        thread_ids.insert(tid.to_string());
        assert!(seen.insert(rest.to_string()), "duplicate line: {:?}", line);
    }
    assert_eq!(thread_ids.len(), WRITERS);
}

#[test]
fn test_concurrent_first_load_builds_one_transport() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("first_use.log");
    let config = LogConfig::new("%m%n")
        .file(&log_file)
        .root(LogLevel::Info, &[AppenderKind::File]);

    let manager = Arc::new(ConfigurationManager::new());
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            let config = config.clone();
            thread::spawn(move || {
                barrier.wait();
                manager.load(&config).unwrap();
                manager.snapshot().unwrap()
            })
        })
        .collect();

    let snapshots: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Loader thread panicked"))
        .collect();
    let first = &snapshots[0].root().targets()[0].1;
    for snapshot in &snapshots[1..] {
        assert!(Arc::ptr_eq(first, &snapshot.root().targets()[0].1));
    }
    assert_eq!(manager.metrics().reloads(), 4);
}
