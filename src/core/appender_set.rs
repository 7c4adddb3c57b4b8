//! Appender kinds and the per-logger appender set

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The four transport kinds, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AppenderKind {
    #[serde(rename = "console_appender")]
    Console,
    #[serde(rename = "file_appender")]
    File,
    #[serde(rename = "tcp_appender")]
    Tcp,
    #[serde(rename = "udp_appender")]
    Udp,
}

impl AppenderKind {
    /// Dispatch order: console, file, tcp, udp
    pub const ALL: [AppenderKind; 4] = [
        AppenderKind::Console,
        AppenderKind::File,
        AppenderKind::Tcp,
        AppenderKind::Udp,
    ];

    pub const fn flag(self) -> u8 {
        match self {
            AppenderKind::Console => 0x01,
            AppenderKind::File => 0x02,
            AppenderKind::Tcp => 0x04,
            AppenderKind::Udp => 0x08,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            AppenderKind::Console => 0,
            AppenderKind::File => 1,
            AppenderKind::Tcp => 2,
            AppenderKind::Udp => 3,
        }
    }

    /// Configuration key, e.g. `"console_appender"`
    pub const fn name(self) -> &'static str {
        match self {
            AppenderKind::Console => "console_appender",
            AppenderKind::File => "file_appender",
            AppenderKind::Tcp => "tcp_appender",
            AppenderKind::Udp => "udp_appender",
        }
    }
}

impl fmt::Display for AppenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppenderKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppenderKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                LoggerError::config(
                    "appenders",
                    format!(
                        "unknown appender '{}', valid names: console_appender, file_appender, tcp_appender, udp_appender",
                        s
                    ),
                )
            })
    }
}

/// Bit set of appender kinds attached to a logger.
///
/// Serialized as a list of kind names in dispatch order.
///
/// # Example
///
/// ```
/// use rust_layout_logger::{AppenderKind, AppenderSet};
///
/// let set: AppenderSet = ["udp_appender", "console_appender"].iter().map(|s| s.parse().unwrap()).collect();
/// assert_eq!(set.bits(), 0x09);
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![AppenderKind::Console, AppenderKind::Udp]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AppenderSet(u8);

impl AppenderSet {
    const VALID_BITS: u8 = 0x0F;

    pub const fn empty() -> Self {
        AppenderSet(0)
    }

    /// Build from raw bits; reserved bits must be zero.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::VALID_BITS == 0 {
            Some(AppenderSet(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, kind: AppenderKind) {
        self.0 |= kind.flag();
    }

    #[must_use]
    pub fn with(mut self, kind: AppenderKind) -> Self {
        self.insert(kind);
        self
    }

    pub const fn contains(self, kind: AppenderKind) -> bool {
        self.0 & kind.flag() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Kinds present, in dispatch order
    pub fn iter(self) -> impl Iterator<Item = AppenderKind> {
        AppenderKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }

    pub fn names(self) -> Vec<&'static str> {
        self.iter().map(AppenderKind::name).collect()
    }
}

impl FromIterator<AppenderKind> for AppenderSet {
    fn from_iter<I: IntoIterator<Item = AppenderKind>>(iter: I) -> Self {
        let mut set = AppenderSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl Serialize for AppenderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AppenderSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kinds = Vec::<AppenderKind>::deserialize(deserializer)?;
        Ok(kinds.into_iter().collect())
    }
}
