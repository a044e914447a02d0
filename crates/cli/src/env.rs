// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

/// Log directory override from LOGMON_DIR
pub fn log_dir() -> Option<PathBuf> {
    non_empty("LOGMON_DIR").map(PathBuf::from)
}

/// Config file path from LOGMON_CONFIG
pub fn config_path() -> Option<PathBuf> {
    non_empty("LOGMON_CONFIG").map(PathBuf::from)
}

/// Resolve default log directory: XDG_STATE_HOME/logmon/logs > ~/.local/state/logmon/logs > ./logs
pub fn default_log_dir() -> PathBuf {
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("logmon/logs");
    }
    match non_empty("HOME") {
        Some(home) => PathBuf::from(home).join(".local/state/logmon/logs"),
        None => PathBuf::from(logmon_storage::FALLBACK_DIR),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
