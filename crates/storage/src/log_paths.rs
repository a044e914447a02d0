// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared path builders for stream log files.
//!
//! Directory structure:
//!   `<log_dir>/<stream>.log`      active file
//!   `<log_dir>/<stream>.log.old`  single rotated generation

use std::path::{Path, PathBuf};

/// Suffix of an active stream file.
pub const LOG_SUFFIX: &str = ".log";
/// Suffix of a rotated stream file.
pub const ROTATED_SUFFIX: &str = ".log.old";

/// Whether `stream` can name a file directly inside the log directory.
///
/// Rejects empty names, `.` and `..`, and anything containing a path
/// separator or NUL.
pub fn is_valid_stream_name(stream: &str) -> bool {
    !stream.is_empty()
        && stream != "."
        && stream != ".."
        && !stream.contains(['/', '\\', '\0'])
}

/// Build the path to a stream's active log file.
///
/// Structure: `{log_dir}/{stream}.log`
pub fn log_path(log_dir: &Path, stream: &str) -> PathBuf {
    log_dir.join(format!("{}{}", stream, LOG_SUFFIX))
}

/// Build the path to a stream's rotated log file.
///
/// Structure: `{log_dir}/{stream}.log.old`
pub fn rotated_log_path(log_dir: &Path, stream: &str) -> PathBuf {
    log_dir.join(format!("{}{}", stream, ROTATED_SUFFIX))
}

/// Whether a file name is a stream log artifact (`*.log` or `*.log.old`).
///
/// The stem must be non-empty, so a bare `.log` does not match.
pub fn is_log_artifact(file_name: &str) -> bool {
    [ROTATED_SUFFIX, LOG_SUFFIX].iter().any(|suffix| {
        file_name
            .strip_suffix(suffix)
            .is_some_and(|stem| !stem.is_empty())
    })
}

#[cfg(test)]
#[path = "log_paths_tests.rs"]
mod tests;
