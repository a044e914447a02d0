// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background flush scheduler.
//!
//! A single thread per logger wakes every period (15s, or 60s in low-power
//! mode) or earlier when signalled, and runs one sweep of the flush engine.
//! The period is re-read on every iteration so a mode change applies at the
//! next wake. Stopping exits the loop without flushing.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

use logmon_core::Clock;

use crate::logger::Shared;
use crate::SweepReport;

/// Default wake period in normal mode.
pub const NORMAL_PERIOD: Duration = Duration::from_secs(15);
/// Default wake period in low-power mode.
pub const LOW_POWER_PERIOD: Duration = Duration::from_secs(60);
/// Shortest wait between sweeps; a zero period would spin on the store lock.
pub const MIN_PERIOD: Duration = Duration::from_millis(10);
/// Longest wait between sweeps.
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Scheduler wake periods for each power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePeriods {
    pub normal: Duration,
    pub low_power: Duration,
}

impl Default for SchedulePeriods {
    fn default() -> Self {
        Self {
            normal: NORMAL_PERIOD,
            low_power: LOW_POWER_PERIOD,
        }
    }
}

impl SchedulePeriods {
    /// Wake period for the given mode, clamped to `MIN_PERIOD..=MAX_PERIOD`.
    pub fn for_mode(&self, low_power: bool) -> Duration {
        let period = if low_power {
            self.low_power
        } else {
            self.normal
        };
        period.clamp(MIN_PERIOD, MAX_PERIOD)
    }
}

/// Instant at which a wait of `period` starting at `now` ends.
fn deadline_after(now: Instant, period: Duration) -> Instant {
    now.checked_add(period)
        .or_else(|| now.checked_add(MAX_PERIOD))
        .unwrap_or(now)
}

/// Start the scheduler thread.
pub(crate) fn spawn<C: Clock>(shared: Arc<Shared<C>>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("logmon-flush".to_string())
        .spawn(move || run(&shared))
}

fn run<C: Clock>(shared: &Shared<C>) {
    debug!("flush scheduler started");
    let mut state = shared.state.lock();

    while shared.tunables.is_running() {
        let period = shared
            .periods
            .for_mode(shared.tunables.is_low_power());
        let deadline = deadline_after(Instant::now(), period);

        while !state.wake_pending && shared.tunables.is_running() {
            if shared.wake.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.wake_pending = false;

        if !shared.tunables.is_running() {
            break;
        }

        let now = shared.clock.now();
        let report = state.engine.sweep(&shared.tunables, now);
        if report != SweepReport::default() {
            debug!(
                flushed = report.flushed,
                closed = report.closed,
                "flush scheduler sweep",
            );
        }
    }

    debug!("flush scheduler stopped");
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
