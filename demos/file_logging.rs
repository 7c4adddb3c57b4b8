//! File logging example
//!
//! Loads a JSON configuration that sends every record to a file and only
//! warnings and above to the console.
//!
//! Run with: cargo run --example file_logging

use rust_layout_logger::prelude::*;
use std::fs;

const CONFIG: &str = r#"{
    "layout_pattern": "%d{%Y-%m-%d %H:%M:%S.%3f} %-5p %c - %m%n",
    "appenders": {
        "console_appender": { "out_stream": "stderr" },
        "file_appender": { "file_path": "logs/application.log" }
    },
    "layouts": [
        { "name": "audit", "log_level": "info",
          "appenders": ["file_appender"],
          "layout_pattern": "%d{UNIX_MILLIS} AUDIT %m%n" }
    ],
    "root_layout": { "log_level": "debug", "appenders": ["console_appender", "file_appender"] }
}"#;

fn main() -> Result<()> {
    println!("=== Rust Layout Logger - File Logging Example ===\n");

    let manager = ConfigurationManager::new();
    manager.load_json(CONFIG)?;

    println!("1. Logging to both console and file:");
    let app = manager.logger("app");
    app.info("Application started");
    app.debug("Loading configuration...");
    app.warn("Using default settings for some options");
    app.error("Failed to load optional plugin");

    println!("\n2. The audit logger writes to the file only, with its own layout:");
    let audit = manager.logger("audit");
    audit.info("user 42 granted role admin");
    audit.log(LogLevel::Info, "user {} revoked role {}", &[&17, &"viewer"]);

    manager.flush()?;

    println!("\n3. Contents of logs/application.log:");
    let content = fs::read_to_string("logs/application.log")?;
    for line in content.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
