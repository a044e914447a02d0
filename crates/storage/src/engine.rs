// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flush engine: moves buffered content into stream files.
//!
//! Every trigger (immediate flush on append, explicit flush, scheduler
//! sweep) runs the same unit of work: drain -> open -> rotate -> write.
//! Callers hold the logger's store lock for the whole unit.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::error;

use logmon_core::Tunables;

use crate::buffer::BufferStore;
use crate::file::FileStore;
use crate::log_paths::log_path;

/// Result of flushing one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was buffered.
    Empty,
    /// This many bytes reached the stream's file.
    Written(usize),
    /// This many bytes were drained but could not be written and are lost.
    Dropped(usize),
}

/// What one scheduler sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Streams flushed because they were idle or over half the buffer limit.
    pub flushed: usize,
    /// File handles closed for inactivity.
    pub closed: usize,
}

/// Buffer and file stores for all streams.
#[derive(Debug)]
pub struct FlushEngine {
    pub buffers: BufferStore,
    pub files: FileStore,
}

impl FlushEngine {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            buffers: BufferStore::new(),
            files: FileStore::new(dir),
        }
    }

    /// Flush one stream's buffer to its file, rotating first if needed.
    ///
    /// A failure to open or write loses the drained bytes for this flush
    /// only; the error is logged and other streams are unaffected.
    pub fn flush_one(&mut self, stream: &str, tunables: &Tunables, now: Instant) -> FlushOutcome {
        let Some(bytes) = self.buffers.drain(stream) else {
            return FlushOutcome::Empty;
        };

        if let Err(e) = self.files.ensure_open(stream, now) {
            error!(
                stream,
                path = %log_path(self.files.dir(), stream).display(),
                error = %e,
                dropped = bytes.len(),
                "cannot open log file for writing",
            );
            return FlushOutcome::Dropped(bytes.len());
        }

        self.files.rotate_if_needed(stream, tunables.log_size_limit());

        match self.files.write_and_advance(stream, &bytes, now) {
            Ok(()) => FlushOutcome::Written(bytes.len()),
            Err(e) => {
                error!(
                    stream,
                    path = %log_path(self.files.dir(), stream).display(),
                    error = %e,
                    dropped = bytes.len(),
                    "failed to write to log file",
                );
                FlushOutcome::Dropped(bytes.len())
            }
        }
    }

    /// Flush every stream with buffered content, then sync all open handles.
    pub fn flush_all(&mut self, tunables: &Tunables, now: Instant) {
        for stream in self.buffers.pending_streams() {
            self.flush_one(&stream, tunables, now);
        }
        self.files.sync_open();
    }

    /// One scheduler pass.
    ///
    /// Flushes streams idle for longer than `max_idle_ms` or holding more
    /// than half of `buffer_max_bytes`, then closes handles unused for
    /// longer than three times `max_idle_ms`.
    pub fn sweep(&mut self, tunables: &Tunables, now: Instant) -> SweepReport {
        let max_idle = Duration::from_millis(tunables.max_idle_ms());
        let half_buffer = tunables.buffer_max_bytes() / 2;

        let due: Vec<String> = self
            .buffers
            .iter()
            .filter(|(_, buf)| {
                !buf.is_empty() && (buf.idle_for(now) > max_idle || buf.len() > half_buffer)
            })
            .map(|(stream, _)| stream.to_string())
            .collect();

        let mut report = SweepReport::default();
        for stream in &due {
            if self.flush_one(stream, tunables, now) != FlushOutcome::Empty {
                report.flushed += 1;
            }
        }
        report.closed = self.files.close_all_idle(max_idle.saturating_mul(3), now);
        report
    }

    /// Close every file and drop every buffer.
    pub fn clear(&mut self) {
        self.files.clear();
        self.buffers.clear();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
