//! Log record passed to the layout renderer

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Per-thread id cache so `%t` never formats or allocates on the hot path
thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
}

/// Small per-process integer identifying the calling thread.
///
/// Assigned on first use from each thread and stable for its lifetime.
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| {
        let cached = id.get();
        if cached != 0 {
            return cached;
        }
        let assigned = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        id.set(assigned);
        assigned
    })
}

/// Message body of a record.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// Text written verbatim.
    Text(&'a str),
    /// Runtime template with `{}` placeholders, expanded at render time.
    Template {
        format: &'a str,
        args: &'a [&'a dyn fmt::Display],
    },
    /// Arguments precompiled by `format_args!`.
    Args(fmt::Arguments<'a>),
}

impl<'a> Message<'a> {
    pub fn text(text: &'a str) -> Self {
        Message::Text(text)
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Template { format, args } => f
                .debug_struct("Template")
                .field("format", format)
                .field("args", &args.len())
                .finish(),
            Message::Args(args) => f.debug_tuple("Args").field(args).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: LogLevel,
    pub logger_name: &'a str,
    pub message: Message<'a>,
    pub timestamp: DateTime<Utc>,
    pub thread_id: u64,
}

impl<'a> Record<'a> {
    pub fn new(level: LogLevel, logger_name: &'a str, message: Message<'a>) -> Self {
        Self {
            level,
            logger_name,
            message,
            timestamp: Utc::now(),
            thread_id: current_thread_id(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_thread_id(mut self, thread_id: u64) -> Self {
        self.thread_id = thread_id;
        self
    }
}
