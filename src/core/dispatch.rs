//! Fan-out of a rendered line to a logger's appenders
//!
//! Every target is attempted in dispatch order. A failing or panicking
//! appender is counted and reported on stderr; it never stops the others and
//! never reaches the caller.

use super::appender::Appender;
use super::appender_set::AppenderKind;
use super::error::Result;
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Failures between repeated stderr alerts for the same appender kind.
pub const ALERT_INTERVAL: u64 = 1000;

/// Alert on the first failure and then on every `ALERT_INTERVAL`th.
#[inline]
pub(crate) fn should_alert(previous_failures: u64) -> bool {
    previous_failures == 0 || (previous_failures + 1) % ALERT_INTERVAL == 0
}

/// Write `line` to every target, returning the number of failed writes.
pub(crate) fn dispatch(
    targets: &[(AppenderKind, Arc<dyn Appender>)],
    level: LogLevel,
    line: &[u8],
    metrics: &LoggerMetrics,
) -> usize {
    let mut failed = 0;

    for (kind, appender) in targets {
        let result = panic::catch_unwind(AssertUnwindSafe(|| appender.write(level, line)));

        let failure = match result {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => format!("write failed: {}", e),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                format!("panicked: {}", panic_msg)
            }
        };

        failed += 1;
        let previous = metrics.record_write_failure(*kind);
        if should_alert(previous) {
            eprintln!(
                "[LOGGER ERROR] {} {} ({} failures so far). Other appenders continue to function.",
                kind,
                failure,
                previous + 1
            );
        }
    }

    failed
}

/// Flush every target, returning the first failure after attempting all.
pub(crate) fn flush_all(
    targets: impl Iterator<Item = (AppenderKind, Arc<dyn Appender>)>,
) -> Result<()> {
    let mut first_error = None;
    for (kind, appender) in targets {
        if let Err(e) = appender.flush() {
            eprintln!("[LOGGER ERROR] {} flush failed: {}", kind, e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
