// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log severity levels.
//!
//! Severities are ordered from most severe to most verbose, so a lower value
//! is more important. The same scale is used for the configured log level
//! (filtering) and for deciding whether an append must flush immediately.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered log importance: `Error < Warn < Info < Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
}

/// Error returned when a severity token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized severity: {0}")]
pub struct ParseSeverityError(pub String);

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Map a numeric level (1-4) to a severity.
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Severity::Error),
            2 => Some(Severity::Warn),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Numeric level of this severity (1-4).
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Whether an entry of this severity passes a filter set at `log_level`.
    pub fn is_enabled_at(self, log_level: Severity) -> bool {
        self <= log_level
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact, case-sensitive tokens `ERROR`, `WARN`, `INFO`, `DEBUG`.
impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "severity_tests.rs"]
mod tests;
