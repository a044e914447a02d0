// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monotonic clock abstraction.
//!
//! Idle decisions (buffer idle flush, file handle reaping) read time through
//! [`Clock`] so they can be driven deterministically in tests.

use std::time::Instant;

/// Source of monotonic timestamps.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall-clock backed [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Manually advanced clock. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct FakeClock {
        now: Arc<Mutex<Instant>>,
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock();
            *now += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
