// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide logger tunables.
//!
//! Each field is an independent atomic so any component can read it without
//! taking the store lock. No consistency is promised across fields.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};

use crate::Severity;

/// Idle threshold before a buffer is flushed by the scheduler (normal mode).
pub const DEFAULT_MAX_IDLE_MS: u64 = 30_000;
/// Buffer size that triggers an immediate flush on append (normal mode).
pub const DEFAULT_BUFFER_MAX_BYTES: usize = 8192;
/// Idle threshold under low-power mode.
pub const LOW_POWER_MAX_IDLE_MS: u64 = 60_000;
/// Buffer size threshold under low-power mode.
pub const LOW_POWER_BUFFER_MAX_BYTES: usize = 32_768;
/// Active file size above which the next flush rotates it.
pub const DEFAULT_LOG_SIZE_LIMIT: u64 = 102_400;

/// Lock-free configuration shared between writers and the flush scheduler.
#[derive(Debug)]
pub struct Tunables {
    running: AtomicBool,
    low_power: AtomicBool,
    max_idle_ms: AtomicU64,
    buffer_max_bytes: AtomicUsize,
    log_size_limit: AtomicU64,
    log_level: AtomicU8,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            running: AtomicBool::new(true),
            low_power: AtomicBool::new(false),
            max_idle_ms: AtomicU64::new(DEFAULT_MAX_IDLE_MS),
            buffer_max_bytes: AtomicUsize::new(DEFAULT_BUFFER_MAX_BYTES),
            log_size_limit: AtomicU64::new(DEFAULT_LOG_SIZE_LIMIT),
            log_level: AtomicU8::new(Severity::Info.level()),
        }
    }
}

impl Tunables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// One-way transition from running to stopped.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn stop(&self) -> bool {
        self.running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }

    pub fn is_low_power(&self) -> bool {
        self.low_power.load(Ordering::Relaxed)
    }

    /// Switch low-power mode and the two thresholds that go with it.
    ///
    /// Enabling sets idle to 60000ms and buffer to 32768 bytes; disabling
    /// restores 30000ms and 8192 bytes.
    pub fn set_low_power(&self, enabled: bool) {
        self.low_power.store(enabled, Ordering::Relaxed);
        if enabled {
            self.set_max_idle_ms(LOW_POWER_MAX_IDLE_MS);
            self.set_buffer_max_bytes(LOW_POWER_BUFFER_MAX_BYTES);
        } else {
            self.set_max_idle_ms(DEFAULT_MAX_IDLE_MS);
            self.set_buffer_max_bytes(DEFAULT_BUFFER_MAX_BYTES);
        }
    }

    pub fn max_idle_ms(&self) -> u64 {
        self.max_idle_ms.load(Ordering::Relaxed)
    }

    pub fn set_max_idle_ms(&self, ms: u64) {
        self.max_idle_ms.store(ms, Ordering::Relaxed);
    }

    pub fn buffer_max_bytes(&self) -> usize {
        self.buffer_max_bytes.load(Ordering::Relaxed)
    }

    pub fn set_buffer_max_bytes(&self, bytes: usize) {
        self.buffer_max_bytes.store(bytes, Ordering::Relaxed);
    }

    pub fn log_size_limit(&self) -> u64 {
        self.log_size_limit.load(Ordering::Relaxed)
    }

    pub fn set_log_size_limit(&self, bytes: u64) {
        self.log_size_limit.store(bytes, Ordering::Relaxed);
    }

    pub fn log_level(&self) -> Severity {
        Severity::from_level(i64::from(self.log_level.load(Ordering::Relaxed)))
            .unwrap_or_default()
    }

    pub fn set_log_level(&self, level: Severity) {
        self.log_level.store(level.level(), Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "tunables_tests.rs"]
mod tests;
