// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log directory preparation and cleanup.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::log_paths::is_log_artifact;
use crate::LoggerError;

/// Directory used when the configured log path is not a directory.
pub const FALLBACK_DIR: &str = "./logs";

/// Prepare the log directory, falling back to [`FALLBACK_DIR`].
///
/// Returns the directory actually in use.
pub fn prepare_log_dir(dir: &Path) -> Result<PathBuf, LoggerError> {
    prepare_log_dir_with_fallback(dir, Path::new(FALLBACK_DIR))
}

/// Prepare `dir` for use as a log directory.
///
/// - existing directory: used as-is (a read-only one gets a permission fix attempt)
/// - existing non-directory: `fallback` is used instead, created if missing
/// - missing: created recursively with mode 0755
pub fn prepare_log_dir_with_fallback(dir: &Path, fallback: &Path) -> Result<PathBuf, LoggerError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            ensure_writable(dir, &meta);
            Ok(dir.to_path_buf())
        }
        Ok(_) => {
            warn!(
                path = %dir.display(),
                fallback = %fallback.display(),
                "log path exists but is not a directory, trying fallback",
            );
            match fs::metadata(fallback) {
                Ok(meta) if meta.is_dir() => Ok(fallback.to_path_buf()),
                Ok(_) => Err(LoggerError::NotADirectory(fallback.to_path_buf())),
                Err(_) => create_dir(fallback),
            }
        }
        Err(_) => create_dir(dir),
    }
}

fn create_dir(dir: &Path) -> Result<PathBuf, LoggerError> {
    fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if let Err(e) = set_dir_mode(dir) {
        warn!(path = %dir.display(), error = %e, "cannot set log directory permissions");
    }
    Ok(dir.to_path_buf())
}

fn ensure_writable(dir: &Path, meta: &Metadata) {
    if !meta.permissions().readonly() {
        return;
    }
    warn!(path = %dir.display(), "insufficient permissions for log directory");
    if let Err(e) = set_dir_mode(dir) {
        warn!(path = %dir.display(), error = %e, "cannot set log directory permissions");
    }
}

#[cfg(unix)]
fn set_dir_mode(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_dir_mode(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Delete every `*.log` and `*.log.old` file directly inside `dir`.
///
/// Other files and subdirectories are left alone. Failures are logged and
/// skipped. Returns the number of files removed.
pub fn clean_dir(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot open log directory for cleaning");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_log_artifact(name) {
            continue;
        }
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "cannot delete log file"),
        }
    }

    info!(path = %dir.display(), removed, "cleaned log directory");
    removed
}

#[cfg(test)]
#[path = "dir_tests.rs"]
mod tests;
