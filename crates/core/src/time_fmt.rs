// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry timestamps and line formatting.
//!
//! Formatting local time is comparatively expensive, so the rendered
//! timestamp is cached and re-rendered at most once per second.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::time::Duration;

use crate::Severity;

/// Timestamp layout used at the start of every entry line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

struct Cached {
    formatted_at: DateTime<Local>,
    text: String,
}

/// Local-time stamp cache, refreshed at most once per second.
pub struct TimestampCache {
    inner: Mutex<Cached>,
}

impl Default for TimestampCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampCache {
    pub fn new() -> Self {
        let now = Local::now();
        Self {
            inner: Mutex::new(Cached {
                formatted_at: now,
                text: now.format(TIMESTAMP_FORMAT).to_string(),
            }),
        }
    }

    /// Current timestamp text.
    pub fn stamp(&self) -> String {
        self.stamp_at(Local::now())
    }

    /// Timestamp text as seen at `now`.
    ///
    /// Re-renders only when at least one second has passed since the last
    /// render (or the wall clock stepped backwards).
    pub fn stamp_at(&self, now: DateTime<Local>) -> String {
        let mut cached = self.inner.lock();
        let stale = match (now - cached.formatted_at).to_std() {
            Ok(elapsed) => elapsed >= REFRESH_INTERVAL,
            Err(_) => true,
        };
        if stale {
            cached.formatted_at = now;
            cached.text = now.format(TIMESTAMP_FORMAT).to_string();
        }
        cached.text.clone()
    }
}

/// Append one entry line to `out`.
///
/// Format: `YYYY-MM-DD HH:MM:SS [LEVEL] message\n`
pub fn push_entry(out: &mut String, timestamp: &str, severity: Severity, message: &str) {
    out.reserve(timestamp.len() + severity.as_str().len() + message.len() + 5);
    out.push_str(timestamp);
    out.push_str(" [");
    out.push_str(severity.as_str());
    out.push_str("] ");
    out.push_str(message);
    out.push('\n');
}

/// Format a single entry line.
pub fn format_entry(timestamp: &str, severity: Severity, message: &str) -> String {
    let mut line = String::new();
    push_entry(&mut line, timestamp, severity, message);
    line
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
