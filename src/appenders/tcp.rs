//! TCP appender for remote logging
//!
//! Streams rendered lines to a remote collector over a connection bound to a
//! configured local address. The connection is opened on first write and
//! reused; a failed send drops it and reconnects up to `max_reconnects` times
//! before the line is abandoned.

use crate::core::{Appender, LogLevel, LoggerError, Result, TcpAppenderConfig, TransportAddress};
use parking_lot::Mutex;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

pub struct TcpAppender {
    local: SocketAddr,
    remote: TransportAddress,
    max_reconnects: u32,
    timeout: Option<Duration>,
    stream: Mutex<Option<TcpStream>>,
}

impl TcpAppender {
    /// Create an appender; no connection is made until the first write.
    ///
    /// # Errors
    ///
    /// Returns `AppenderInit` if the local address cannot be resolved.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_layout_logger::appenders::TcpAppender;
    /// use rust_layout_logger::TransportAddress;
    ///
    /// let appender = TcpAppender::new(
    ///     TransportAddress::new("0.0.0.0", 0).unwrap(),
    ///     "127.0.0.1:9443".parse().unwrap(),
    /// )
    /// .unwrap();
    /// ```
    pub fn new(local: TransportAddress, remote: TransportAddress) -> Result<Self> {
        let local = local.resolve().map_err(|source| LoggerError::AppenderInit {
            kind: "tcp_appender".to_string(),
            source,
        })?;
        Ok(Self {
            local,
            remote,
            max_reconnects: 1,
            timeout: None,
            stream: Mutex::new(None),
        })
    }

    pub fn from_config(config: &TcpAppenderConfig) -> Result<Self> {
        Ok(Self::new(config.local()?, config.remote()?)?
            .with_max_reconnects(config.max_reconnects)
            .with_timeout(config.timeout_ms.map(Duration::from_millis)))
    }

    /// Reconnect attempts after a failed send, per write. Default: 1
    #[must_use]
    pub fn with_max_reconnects(mut self, max_reconnects: u32) -> Self {
        self.max_reconnects = max_reconnects;
        self
    }

    /// Connect and write timeout. Default: none
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn remote(&self) -> &TransportAddress {
        &self.remote
    }

    pub fn is_connected(&self) -> bool {
        self.stream.lock().is_some()
    }

    fn connect(&self) -> io::Result<TcpStream> {
        let remote = self.remote.resolve()?;
        let socket = Socket::new(Domain::for_address(remote), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&SockAddr::from(self.local))?;
        match self.timeout {
            Some(timeout) => socket.connect_timeout(&SockAddr::from(remote), timeout)?,
            None => socket.connect(&SockAddr::from(remote))?,
        }
        socket.set_write_timeout(self.timeout)?;
        socket.set_nodelay(true)?;
        Ok(socket.into())
    }

    fn send(&self, slot: &mut Option<TcpStream>, bytes: &[u8]) -> io::Result<()> {
        if slot.is_none() {
            *slot = Some(self.connect()?);
        }
        if let Some(stream) = slot.as_mut() {
            // write_all keeps going across partial writes and EINTR
            stream.write_all(bytes)?;
        }
        Ok(())
    }
}

impl Appender for TcpAppender {
    fn write(&self, _level: LogLevel, bytes: &[u8]) -> Result<()> {
        let mut stream = self.stream.lock();
        let mut reconnects = 0;
        loop {
            match self.send(&mut stream, bytes) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    // Connection lost
                    *stream = None;
                    if reconnects >= self.max_reconnects {
                        return Err(LoggerError::transport(
                            self.name(),
                            format!("{} ({} reconnect attempts): {}", self.remote, reconnects, e),
                        ));
                    }
                    reconnects += 1;
                }
            }
        }
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut stream) = *self.stream.lock() {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "tcp_appender"
    }
}
