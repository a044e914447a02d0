// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The logger facade.
//!
//! [`Logger`] owns the tunables, the flush engine (buffers + files) and the
//! background scheduler thread. All buffer and file mutation happens under
//! a single mutex shared by every stream; tunables are lock-free atomics.
//!
//! Stopping the logger never flushes. Callers that need durability call
//! [`Logger::flush_all`] before [`Logger::stop`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use logmon_core::time_fmt::push_entry;
use logmon_core::{
    format_entry, BatchEntry, Clock, Severity, SystemClock, TimestampCache, Tunables,
    DEFAULT_BUFFER_MAX_BYTES, DEFAULT_LOG_SIZE_LIMIT, DEFAULT_MAX_IDLE_MS,
};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, info, warn};

use crate::dir::{clean_dir, prepare_log_dir};
use crate::engine::{FlushEngine, FlushOutcome, SweepReport};
use crate::log_paths::is_valid_stream_name;
use crate::scheduler::{self, SchedulePeriods};
use crate::LoggerError;

/// Startup settings for a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Most verbose severity that is recorded
    pub log_level: Severity,
    /// Active file size above which the next flush rotates it
    pub log_size_limit: u64,
    /// Idle time before the scheduler flushes a buffer
    pub max_idle_ms: u64,
    /// Buffer size that forces an immediate flush on append
    pub buffer_max_bytes: usize,
    /// Start in low-power mode (overrides the two thresholds above)
    pub low_power: bool,
    /// Scheduler wake periods
    pub periods: SchedulePeriods,
    /// Run the background scheduler thread
    pub background_flush: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            log_level: Severity::Info,
            log_size_limit: DEFAULT_LOG_SIZE_LIMIT,
            max_idle_ms: DEFAULT_MAX_IDLE_MS,
            buffer_max_bytes: DEFAULT_BUFFER_MAX_BYTES,
            low_power: false,
            periods: SchedulePeriods::default(),
            background_flush: true,
        }
    }
}

/// State guarded by the store lock.
pub(crate) struct LoggerState {
    pub engine: FlushEngine,
    /// Set with the lock held before signalling the scheduler
    pub wake_pending: bool,
}

/// State shared between the logger and its scheduler thread.
pub(crate) struct Shared<C> {
    pub tunables: Tunables,
    pub state: Mutex<LoggerState>,
    pub wake: Condvar,
    pub clock: C,
    pub periods: SchedulePeriods,
}

impl<C> Shared<C> {
    /// Wake the scheduler for an early sweep.
    fn wake_scheduler(&self, state: &mut LoggerState) {
        state.wake_pending = true;
        self.wake.notify_one();
    }
}

/// Buffered, rotating writer for named log streams.
pub struct Logger<C: Clock = SystemClock> {
    shared: Arc<Shared<C>>,
    dir: PathBuf,
    timestamps: TimestampCache,
    scheduler: Mutex<Option<JoinHandle<()>>>,
}

impl Logger<SystemClock> {
    /// Create a logger writing under `dir`.
    ///
    /// Fails only if no usable log directory can be prepared.
    pub fn new(dir: impl AsRef<Path>, options: LoggerOptions) -> Result<Self, LoggerError> {
        Self::with_clock(dir, options, SystemClock)
    }
}

impl<C: Clock> Logger<C> {
    /// Create a logger that reads time from `clock`.
    pub fn with_clock(
        dir: impl AsRef<Path>,
        options: LoggerOptions,
        clock: C,
    ) -> Result<Self, LoggerError> {
        let dir = prepare_log_dir(dir.as_ref())?;

        let tunables = Tunables::new();
        tunables.set_log_level(options.log_level);
        tunables.set_log_size_limit(options.log_size_limit);
        tunables.set_max_idle_ms(options.max_idle_ms);
        tunables.set_buffer_max_bytes(options.buffer_max_bytes);
        if options.low_power {
            if options.max_idle_ms != DEFAULT_MAX_IDLE_MS
                || options.buffer_max_bytes != DEFAULT_BUFFER_MAX_BYTES
            {
                warn!(
                    max_idle_ms = options.max_idle_ms,
                    buffer_max_bytes = options.buffer_max_bytes,
                    "low-power mode overrides configured idle and buffer thresholds",
                );
            }
            tunables.set_low_power(true);
        }

        let shared = Arc::new(Shared {
            tunables,
            state: Mutex::new(LoggerState {
                engine: FlushEngine::new(dir.clone()),
                wake_pending: false,
            }),
            wake: Condvar::new(),
            clock,
            periods: options.periods,
        });

        let handle = if options.background_flush {
            Some(scheduler::spawn(Arc::clone(&shared))?)
        } else {
            None
        };

        debug!(
            dir = %dir.display(),
            level = %options.log_level,
            low_power = options.low_power,
            "logger started",
        );

        Ok(Self {
            shared,
            dir,
            timestamps: TimestampCache::new(),
            scheduler: Mutex::new(handle),
        })
    }

    /// Directory actually in use (may be the fallback directory).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tunables(&self) -> &Tunables {
        &self.shared.tunables
    }

    pub fn is_running(&self) -> bool {
        self.shared.tunables.is_running()
    }

    /// Record one entry on `stream`.
    ///
    /// Entries more verbose than the log level, and entries written after
    /// [`stop`](Self::stop), are discarded.
    pub fn write(&self, stream: &str, severity: Severity, message: &str) {
        if !severity.is_enabled_at(self.shared.tunables.log_level()) {
            return;
        }
        if !self.is_running() {
            debug!(stream, "logger stopped, entry discarded");
            return;
        }
        let line = format_entry(&self.timestamps.stamp(), severity, message);
        self.append(stream, line.as_bytes(), severity);
    }

    /// Record several entries on `stream` as a single append.
    ///
    /// Filtered entries are dropped; all survivors share one timestamp. The
    /// append flushes immediately if any survivor is an error.
    pub fn batch_write(&self, stream: &str, entries: &[BatchEntry]) {
        if !self.is_running() {
            debug!(stream, "logger stopped, batch discarded");
            return;
        }
        let level = self.shared.tunables.log_level();
        let mut kept = entries
            .iter()
            .filter(|entry| entry.severity.is_enabled_at(level))
            .peekable();
        if kept.peek().is_none() {
            return;
        }

        let timestamp = self.timestamps.stamp();
        let mut content = String::new();
        let mut has_error = false;
        for entry in kept {
            has_error |= entry.severity == Severity::Error;
            push_entry(&mut content, &timestamp, entry.severity, &entry.message);
        }

        let aggregate = if has_error {
            Severity::Error
        } else {
            Severity::Info
        };
        self.append(stream, content.as_bytes(), aggregate);
    }

    fn append(&self, stream: &str, content: &[u8], severity: Severity) {
        if !is_valid_stream_name(stream) {
            warn!(stream, "invalid stream name, entry discarded");
            return;
        }
        let tunables = &self.shared.tunables;
        let mut state = self.shared.state.lock();
        let now = self.shared.clock.now();
        let size = state.engine.buffers.append(stream, content, now);

        let immediate = severity == Severity::Error
            || (!tunables.is_low_power() && size >= tunables.buffer_max_bytes());
        if immediate {
            state.engine.flush_one(stream, tunables, now);
            self.shared.wake_scheduler(&mut state);
        }
    }

    /// Flush one stream's buffer to disk.
    pub fn flush(&self, stream: &str) -> FlushOutcome {
        let mut state = self.shared.state.lock();
        let now = self.shared.clock.now();
        state.engine.flush_one(stream, &self.shared.tunables, now)
    }

    /// Flush every stream and sync every open file.
    pub fn flush_all(&self) {
        let mut state = self.shared.state.lock();
        let now = self.shared.clock.now();
        state.engine.flush_all(&self.shared.tunables, now);
    }

    /// Run one scheduler sweep on the calling thread.
    pub fn sweep(&self) -> SweepReport {
        let mut state = self.shared.state.lock();
        let now = self.shared.clock.now();
        state.engine.sweep(&self.shared.tunables, now)
    }

    /// Drop all buffers and file handles, then delete every `*.log` and
    /// `*.log.old` file in the log directory. Returns the number deleted.
    pub fn clean(&self) -> usize {
        let mut state = self.shared.state.lock();
        state.engine.clear();
        clean_dir(&self.dir)
    }

    /// Switch low-power mode and wake the scheduler so its period updates.
    pub fn set_low_power(&self, enabled: bool) {
        self.shared.tunables.set_low_power(enabled);
        let mut state = self.shared.state.lock();
        self.shared.wake_scheduler(&mut state);
        info!(low_power = enabled, "power mode changed");
    }

    pub fn set_log_level(&self, level: Severity) {
        self.shared.tunables.set_log_level(level);
    }

    pub fn set_max_idle_ms(&self, ms: u64) {
        self.shared.tunables.set_max_idle_ms(ms);
    }

    pub fn set_buffer_max_bytes(&self, bytes: usize) {
        self.shared.tunables.set_buffer_max_bytes(bytes);
    }

    pub fn set_log_size_limit(&self, bytes: u64) {
        self.shared.tunables.set_log_size_limit(bytes);
    }

    /// Bytes currently buffered for `stream`.
    pub fn buffered_len(&self, stream: &str) -> usize {
        let state = self.shared.state.lock();
        state.engine.buffers.get(stream).map_or(0, |buf| buf.len())
    }

    /// Whether `stream` currently holds an open file handle.
    pub fn has_open_file(&self, stream: &str) -> bool {
        let state = self.shared.state.lock();
        state.engine.files.get(stream).is_some_and(|f| f.is_open())
    }

    /// Stop the scheduler and reject further writes. Idempotent.
    ///
    /// Does not flush.
    pub fn stop(&self) {
        if self.shared.tunables.stop() {
            let _state = self.shared.state.lock();
            self.shared.wake.notify_all();
            debug!("logger stopping");
        }
        let handle = self.scheduler.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("flush scheduler thread panicked");
            }
        }
    }
}

impl<C: Clock> Drop for Logger<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
