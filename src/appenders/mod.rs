//! Appender implementations

pub mod console;
pub mod file;
pub mod tcp;
pub mod udp;

pub use console::{ConsoleAppender, ConsoleStream};
pub use file::FileAppender;
pub use tcp::TcpAppender;
pub use udp::UdpAppender;

pub use crate::core::Appender;

use crate::core::{AppenderSettings, Result};
use std::sync::Arc;

/// Construct the appender described by `settings`, acquiring its transport.
pub fn build_appender(settings: &AppenderSettings) -> Result<Arc<dyn Appender>> {
    let appender: Arc<dyn Appender> = match settings {
        AppenderSettings::Console(config) => Arc::new(ConsoleAppender::new(&config.out_stream)?),
        AppenderSettings::File(config) => Arc::new(FileAppender::new(&config.file_path)?),
        AppenderSettings::Tcp(config) => Arc::new(TcpAppender::from_config(config)?),
        AppenderSettings::Udp(config) => Arc::new(UdpAppender::from_config(config)?),
    };
    Ok(appender)
}
