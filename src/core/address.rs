//! Transport address value type for network appenders

use super::error::{LoggerError, Result};
use std::fmt;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// Host (IP literal or DNS name) plus port.
///
/// IP literals are kept in their canonical textual form and host names are
/// lowercased, so structural equality matches address equality.
///
/// # Example
///
/// ```
/// use rust_layout_logger::TransportAddress;
///
/// let addr: TransportAddress = "127.0.0.1:9443".parse().unwrap();
/// assert_eq!(addr.port(), 9443);
/// assert_eq!(addr.to_string(), "127.0.0.1:9443");
///
/// let v6 = TransportAddress::new("::1", 514).unwrap();
/// assert_eq!(v6.to_string(), "[::1]:514");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransportAddress {
    host: String,
    port: u16,
}

impl TransportAddress {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let host = canonical_host(host)
            .ok_or_else(|| LoggerError::invalid_address(host, "not an IP address or host name"))?;
        Ok(Self { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }

    /// Resolve to the first socket address; name lookups happen here, not at parse time.
    pub fn resolve(&self) -> std::io::Result<SocketAddr> {
        if let Some(ip) = self.ip() {
            return Ok(SocketAddr::new(ip, self.port));
        }
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no address found for '{}'", self.host),
                )
            })
    }
}

fn canonical_host(host: &str) -> Option<String> {
    let trimmed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if let Ok(ip) = trimmed.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    if is_host_name(host) {
        return Some(host.to_ascii_lowercase());
    }
    None
}

fn is_host_name(host: &str) -> bool {
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

impl FromStr for TransportAddress {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| LoggerError::invalid_address(s, "unterminated '['"))?;
            let port = tail
                .strip_prefix(':')
                .ok_or_else(|| LoggerError::invalid_address(s, "missing port"))?;
            (host, port)
        } else {
            s.rsplit_once(':')
                .ok_or_else(|| LoggerError::invalid_address(s, "missing port"))?
        };
        if host.contains(':') && !s.starts_with('[') {
            return Err(LoggerError::invalid_address(
                s,
                "IPv6 addresses must be bracketed",
            ));
        }
        let port = port
            .parse::<u16>()
            .map_err(|e| LoggerError::invalid_address(s, format!("bad port: {}", e)))?;
        Self::new(host, port).map_err(|_| LoggerError::invalid_address(s, "bad host"))
    }
}

impl fmt::Display for TransportAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl From<SocketAddr> for TransportAddress {
    fn from(addr: SocketAddr) -> Self {
        Self {
            host: addr.ip().to_string(),
            port: addr.port(),
        }
    }
}
