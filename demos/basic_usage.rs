//! Basic logger usage example
//!
//! Demonstrates a console configuration, per-logger thresholds and the
//! logging macros.
//!
//! Run with: cargo run --example basic_usage

use rust_layout_logger::prelude::*;
use rust_layout_logger::{debug, info, warn};

fn main() -> Result<()> {
    println!("=== Rust Layout Logger - Basic Usage Example ===\n");

    let manager = ConfigurationManager::global();
    manager.load(
        &LogConfig::new("%d [%t] %-5p %-8c - %m%n")
            .console("stdout")
            .logger("db", LogLevel::Trace, &[AppenderKind::Console])
            .root(LogLevel::Info, &[AppenderKind::Console]),
    )?;

    println!("1. Logging at different levels through the root logger:");
    let app = manager.logger("app");
    app.trace("This is a trace message (hidden)");
    app.debug("This is a debug message (hidden)");
    app.info("This is an info message");
    app.warn("This is a warning message");
    app.error("This is an error message");
    app.fatal("This is a fatal message");

    println!("\n2. The \"db\" logger has its own TRACE threshold:");
    let db = manager.logger("db");
    db.trace("Opening connection pool");
    db.debug("Pool ready");

    println!("\n3. Formatting with macros and runtime templates:");
    let port = 8080;
    info!(manager, "app", "Server listening on port {}", port);
    debug!(manager, "db", "{} connections idle", 4);
    warn!(manager, "app", "Slow request: {:.1} ms", 250.25);
    manager.log("app", LogLevel::Info, "user {} logged in from {}", &[&42, &"10.0.0.7"]);

    println!("\n4. Metrics:");
    let metrics = manager.metrics();
    println!("   dispatched: {}", metrics.total_dispatched());
    println!("   filtered:   {}", metrics.filtered_count());

    manager.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
