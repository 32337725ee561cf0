//! Severity levels, output targets and message tags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::LogError;

/// Message severity.
///
/// The ordering is the filtering order: a logger configured at some level
/// emits every message at that level or above. `Info` sorts below `Debug`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogLevel {
    None = 0,
    Trace = 1,
    Info = 10,
    Debug = 20,
    Warning = 30,
    Error = 100,
    Fatal = u8::MAX,
}

impl LogLevel {
    /// Label written between brackets in a formatted line. `None` has no label.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Trace => Some("TRACE"),
            Self::Info => Some("INFO"),
            Self::Debug => Some("DEBUG"),
            Self::Warning => Some("WARNING"),
            Self::Error => Some("ERROR"),
            Self::Fatal => Some("FATAL"),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("NONE"))
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "trace" => Ok(Self::Trace),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

bitflags! {
    /// Where formatted lines go.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LogTargets: u8 {
        const CONSOLE = 0x01;
        const DISK = 0x02;
        const DB = 0x04;
        const SYSLOG = 0x08;
        const RESERVED_1 = 0x10;
        const RESERVED_2 = 0x20;
        const RESERVED_3 = 0x40;
        const RESERVED_4 = 0x80;
    }
}

impl FromStr for LogTargets {
    type Err = LogError;

    /// Parse a `|` or `,` separated list of target names, e.g. `console|db`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(['|', ','])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Self::empty(), |targets, name| {
                Self::from_name(&name.to_ascii_uppercase())
                    .map(|target| targets | target)
                    .ok_or_else(|| LogError::UnknownTarget(name.to_string()))
            })
    }
}

/// Tag attached to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogTag {
    /// Always emitted, whatever the configured level.
    Assert,
    Named(&'static str),
}

impl LogTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assert => "ASSERT",
            Self::Named(name) => *name,
        }
    }
}

impl Default for LogTag {
    fn default() -> Self {
        Self::Named("UNKNOWN")
    }
}
