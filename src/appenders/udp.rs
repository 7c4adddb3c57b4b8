//! UDP appender: one datagram per rendered line, no retry

use crate::core::{Appender, LogLevel, LoggerError, Result, TransportAddress, UdpAppenderConfig};
use parking_lot::Mutex;
use std::net::{SocketAddr, UdpSocket};

pub struct UdpAppender {
    remote: SocketAddr,
    socket: Mutex<UdpSocket>,
}

impl UdpAppender {
    /// Bind `local` and resolve `remote` up front.
    pub fn new(local: TransportAddress, remote: TransportAddress) -> Result<Self> {
        let init_error = |source| LoggerError::AppenderInit {
            kind: "udp_appender".to_string(),
            source,
        };
        let socket = UdpSocket::bind(local.resolve().map_err(init_error)?).map_err(init_error)?;
        let remote = remote.resolve().map_err(init_error)?;
        Ok(Self {
            remote,
            socket: Mutex::new(socket),
        })
    }

    pub fn from_config(config: &UdpAppenderConfig) -> Result<Self> {
        Self::new(config.local()?, config.remote()?)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.lock().local_addr()?)
    }

    pub fn remote(&self) -> SocketAddr {
        self.remote
    }
}

impl Appender for UdpAppender {
    fn write(&self, _level: LogLevel, bytes: &[u8]) -> Result<()> {
        let socket = self.socket.lock();
        let sent = socket
            .send_to(bytes, self.remote)
            .map_err(|e| LoggerError::transport(self.name(), format!("{}: {}", self.remote, e)))?;
        if sent != bytes.len() {
            return Err(LoggerError::transport(
                self.name(),
                format!("short datagram: {} of {} bytes", sent, bytes.len()),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "udp_appender"
    }
}
