//! Configuration reload example
//!
//! Shows that a rejected reload leaves the active configuration in place and
//! that a good reload takes effect for every following call.
//!
//! Run with: cargo run --example reload

use rust_layout_logger::prelude::*;
use rust_layout_logger::info;

fn config(pattern: &str, level: LogLevel) -> LogConfig {
    LogConfig::new(pattern)
        .console("stdout")
        .root(level, &[AppenderKind::Console])
}

fn main() -> Result<()> {
    println!("=== Rust Layout Logger - Reload Example ===\n");

    let manager = ConfigurationManager::new();
    manager.load(&config("v1 %-5p %m%n", LogLevel::Info))?;
    info!(manager, "app", "running with the first configuration");

    println!("\n1. A reload with a broken pattern is rejected:");
    match manager.reload(&config("v2 %-5p %m%q", LogLevel::Debug)) {
        Ok(()) => println!("   unexpectedly accepted"),
        Err(e) => println!("   rejected: {}", e),
    }
    info!(manager, "app", "still using the first configuration");

    println!("\n2. A valid reload replaces the snapshot atomically:");
    manager.reload(&config("v2 [%c] %p %m%n", LogLevel::Debug))?;
    rust_layout_logger::debug!(manager, "app", "debug is now visible");

    println!("\n3. Active configuration:");
    if let Some(active) = manager.config() {
        println!("{}", active.to_json_string()?);
    }

    let metrics = manager.metrics();
    println!(
        "\nreloads: {}, rejected: {}",
        metrics.reloads(),
        metrics.reload_failures()
    );
    Ok(())
}
