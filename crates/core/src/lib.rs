// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logmon-core: shared types for the logmon buffered log writer

pub mod batch;
pub mod clock;
pub mod severity;
pub mod time_fmt;
pub mod tunables;

pub use batch::{parse_batch, BatchEntry, BatchParse, BatchWarning};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use clock::{Clock, SystemClock};
pub use severity::{ParseSeverityError, Severity};
pub use time_fmt::{format_entry, TimestampCache};
pub use tunables::{
    Tunables, DEFAULT_BUFFER_MAX_BYTES, DEFAULT_LOG_SIZE_LIMIT, DEFAULT_MAX_IDLE_MS,
    LOW_POWER_BUFFER_MAX_BYTES, LOW_POWER_MAX_IDLE_MS,
};
