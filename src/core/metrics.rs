//! Logger metrics for observability
//!
//! Counters for dispatched, filtered and truncated records, per-appender write
//! failures, and configuration reloads.

use super::appender_set::AppenderKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_layout_logger::{AppenderKind, LoggerMetrics};
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_write_failure(AppenderKind::Tcp);
///
/// assert_eq!(metrics.total_dispatched(), 1);
/// assert_eq!(metrics.write_failures(AppenderKind::Tcp), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the threshold and were dispatched
    total_dispatched: AtomicU64,

    /// Records rejected by the logger threshold
    filtered_count: AtomicU64,

    /// Records cut at the line buffer boundary
    truncated_count: AtomicU64,

    /// Failed appender writes, indexed by `AppenderKind::index`
    write_failures: [AtomicU64; 4],

    /// Successful load/reload calls
    reloads: AtomicU64,

    /// Rejected load/reload calls
    reload_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_dispatched: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            truncated_count: AtomicU64::new(0),
            write_failures: [
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
            ],
            reloads: AtomicU64::new(0),
            reload_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_dispatched(&self) -> u64 {
        self.total_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn truncated_count(&self) -> u64 {
        self.truncated_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self, kind: AppenderKind) -> u64 {
        self.write_failures[kind.index()].load(Ordering::Relaxed)
    }

    pub fn total_write_failures(&self) -> u64 {
        AppenderKind::ALL
            .into_iter()
            .map(|kind| self.write_failures(kind))
            .sum()
    }

    #[inline]
    pub fn reloads(&self) -> u64 {
        self.reloads.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reload_failures(&self) -> u64 {
        self.reload_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.total_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_truncated(&self) -> u64 {
        self.truncated_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed write, returning the previous failure count for `kind`
    #[inline]
    pub fn record_write_failure(&self, kind: AppenderKind) -> u64 {
        self.write_failures[kind.index()].fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reload(&self) -> u64 {
        self.reloads.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reload_failure(&self) -> u64 {
        self.reload_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed appender writes per dispatched record, as a percentage
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn failure_rate(&self) -> f64 {
        let dispatched = self.total_dispatched() as f64;
        if dispatched == 0.0 {
            0.0
        } else {
            (self.total_write_failures() as f64 / dispatched) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_dispatched.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.truncated_count.store(0, Ordering::Relaxed);
        for counter in &self.write_failures {
            counter.store(0, Ordering::Relaxed);
        }
        self.reloads.store(0, Ordering::Relaxed);
        self.reload_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_dispatched: AtomicU64::new(self.total_dispatched()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            truncated_count: AtomicU64::new(self.truncated_count()),
            write_failures: AppenderKind::ALL.map(|kind| AtomicU64::new(self.write_failures(kind))),
            reloads: AtomicU64::new(self.reloads()),
            reload_failures: AtomicU64::new(self.reload_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_dispatched(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.truncated_count(), 0);
        assert_eq!(metrics.total_write_failures(), 0);
        assert_eq!(metrics.reloads(), 0);
    }

    #[test]
    fn test_write_failures_are_per_kind() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_write_failure(AppenderKind::File), 0); // Returns previous value
        metrics.record_write_failure(AppenderKind::File);
        metrics.record_write_failure(AppenderKind::Udp);

        assert_eq!(metrics.write_failures(AppenderKind::File), 2);
        assert_eq!(metrics.write_failures(AppenderKind::Udp), 1);
        assert_eq!(metrics.write_failures(AppenderKind::Console), 0);
        assert_eq!(metrics.total_write_failures(), 3);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..100 {
            metrics.record_dispatched();
        }
        for _ in 0..10 {
            metrics.record_write_failure(AppenderKind::Tcp);
        }
        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();
        metrics.record_filtered();
        metrics.record_write_failure(AppenderKind::Console);
        metrics.record_reload_failure();

        metrics.reset();

        assert_eq!(metrics.total_dispatched(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.total_write_failures(), 0);
        assert_eq!(metrics.reload_failures(), 0);
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();
        metrics.record_write_failure(AppenderKind::File);

        let snapshot = metrics.clone();
        assert_eq!(snapshot.total_dispatched(), 1);
        assert_eq!(snapshot.write_failures(AppenderKind::File), 1);

        // Original and clone are independent
        metrics.record_dispatched();
        assert_eq!(metrics.total_dispatched(), 2);
        assert_eq!(snapshot.total_dispatched(), 1);
    }
}
