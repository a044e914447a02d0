// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stream log files: lazy open, size tracking, rotation, idle reaping.
//!
//! A [`LogFile`] entry is created on the first flush of a stream and then
//! persists; only its handle comes and goes. While a handle is open,
//! `current_size` matches the on-disk length of the active file.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use crate::log_paths::{log_path, rotated_log_path};

/// Open-handle state and size bookkeeping for one stream.
#[derive(Debug)]
pub struct LogFile {
    handle: Option<File>,
    current_size: u64,
    last_access: Instant,
    /// Size must be read from disk on the next open
    needs_size: bool,
}

impl LogFile {
    fn new(now: Instant) -> Self {
        Self {
            handle: None,
            current_size: 0,
            last_access: now,
            needs_size: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Tracked size of the active file, excluding anything still buffered.
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn last_access(&self) -> Instant {
        self.last_access
    }
}

/// Mapping from stream name to its log file.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    files: BTreeMap<String, LogFile>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get(&self, stream: &str) -> Option<&LogFile> {
        self.files.get(stream)
    }

    /// Open the stream's active file for appending if no handle is open.
    ///
    /// The first open reads the existing file length; a failed read counts
    /// as size 0.
    pub fn ensure_open(&mut self, stream: &str, now: Instant) -> io::Result<()> {
        let path = log_path(&self.dir, stream);
        let entry = self
            .files
            .entry(stream.to_string())
            .or_insert_with(|| LogFile::new(now));
        if entry.handle.is_some() {
            return Ok(());
        }

        let file = open_append(&path)?;
        if entry.needs_size {
            entry.current_size = file_len(stream, &path, &file);
            entry.needs_size = false;
        }
        entry.handle = Some(file);
        entry.last_access = now;
        debug!(stream, size = entry.current_size, "opened log file");
        Ok(())
    }

    /// Rotate the active file when its tracked size exceeds `limit`.
    ///
    /// The handle is closed, any existing `.log.old` is removed, `.log` is
    /// renamed to `.log.old` (copy + delete if rename fails) and `.log` is
    /// reopened. Each failure is logged and rotation continues; if `.log`
    /// could not be moved away, its size is re-read on reopen.
    /// Returns whether `.log` was moved to `.log.old`.
    pub fn rotate_if_needed(&mut self, stream: &str, limit: u64) -> bool {
        let path = log_path(&self.dir, stream);
        let old_path = rotated_log_path(&self.dir, stream);
        let Some(entry) = self.files.get_mut(stream) else {
            return false;
        };
        if entry.handle.is_none() || entry.current_size <= limit {
            return false;
        }

        entry.handle = None;

        if old_path.exists() {
            if let Err(e) = fs::remove_file(&old_path) {
                warn!(
                    stream,
                    path = %old_path.display(),
                    error = %e,
                    "cannot delete old file during log rotation",
                );
            }
        }

        let moved = !path.exists() || move_file(stream, &path, &old_path);

        entry.current_size = 0;
        match open_append(&path) {
            Ok(file) => {
                if !moved {
                    entry.current_size = file_len(stream, &path, &file);
                }
                entry.handle = Some(file);
            }
            Err(e) => {
                warn!(stream, path = %path.display(), error = %e, "cannot reopen log file after rotation");
                entry.needs_size = true;
            }
        }
        if moved {
            debug!(stream, "rotated log file");
        }
        moved
    }

    /// Write `bytes` to the stream's open handle and advance its size.
    ///
    /// On failure the handle is closed, the size reset, and the error
    /// returned; the caller owns the bytes and does not retry.
    pub fn write_and_advance(&mut self, stream: &str, bytes: &[u8], now: Instant) -> io::Result<()> {
        let Some(entry) = self.files.get_mut(stream) else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "log file not open"));
        };
        let Some(file) = entry.handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "log file not open"));
        };

        if let Err(e) = file.write_all(bytes) {
            entry.handle = None;
            entry.current_size = 0;
            entry.needs_size = true;
            return Err(e);
        }
        if let Err(e) = file.sync_data() {
            warn!(stream, error = %e, "cannot sync log file");
        }
        entry.current_size += bytes.len() as u64;
        entry.last_access = now;
        Ok(())
    }

    /// Close the stream's handle if it has been unused for longer than `threshold`.
    ///
    /// Size bookkeeping is kept; the file is reopened on the next flush.
    pub fn close_idle(&mut self, stream: &str, threshold: Duration, now: Instant) -> bool {
        let Some(entry) = self.files.get_mut(stream) else {
            return false;
        };
        close_if_idle(stream, entry, threshold, now)
    }

    /// Apply [`close_idle`](Self::close_idle) to every stream. Returns the number closed.
    pub fn close_all_idle(&mut self, threshold: Duration, now: Instant) -> usize {
        let mut closed = 0;
        for (stream, entry) in &mut self.files {
            if close_if_idle(stream, entry, threshold, now) {
                closed += 1;
            }
        }
        closed
    }

    /// Force every open handle to commit to storage.
    pub fn sync_open(&mut self) {
        for (stream, entry) in &mut self.files {
            if let Some(file) = entry.handle.as_mut() {
                if let Err(e) = file.sync_data() {
                    warn!(stream = stream.as_str(), error = %e, "cannot sync log file");
                }
            }
        }
    }

    /// Number of streams with an open handle.
    pub fn open_count(&self) -> usize {
        self.files.values().filter(|f| f.is_open()).count()
    }

    /// Close every handle and forget all bookkeeping.
    pub fn clear(&mut self) {
        self.files.clear();
    }
}

fn close_if_idle(stream: &str, entry: &mut LogFile, threshold: Duration, now: Instant) -> bool {
    if entry.handle.is_none() || now.saturating_duration_since(entry.last_access) <= threshold {
        return false;
    }
    entry.handle = None;
    debug!(stream, "closed idle log file");
    true
}

/// Rename `from` to `to`, falling back to copy + delete. Returns whether
/// `from` is gone.
fn move_file(stream: &str, from: &Path, to: &Path) -> bool {
    let Err(e) = fs::rename(from, to) else {
        return true;
    };
    warn!(
        stream,
        from = %from.display(),
        to = %to.display(),
        error = %e,
        "cannot rename file during log rotation, copying instead",
    );
    if let Err(e) = fs::copy(from, to) {
        error!(
            stream,
            path = %from.display(),
            error = %e,
            "log rotation failed, continuing with current file",
        );
        return false;
    }
    match fs::remove_file(from) {
        Ok(()) => true,
        Err(e) => {
            error!(
                stream,
                path = %from.display(),
                error = %e,
                "cannot delete log file after copying during rotation",
            );
            false
        }
    }
}

/// On-disk length of an open log file; a failed lookup counts as 0.
fn file_len(stream: &str, path: &Path, file: &File) -> u64 {
    match file.metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(stream, path = %path.display(), error = %e, "cannot get log file size");
            0
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
