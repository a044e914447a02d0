// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Buffered, rotating per-stream log storage for logmon
//!
//! Writers append into per-stream memory buffers; buffers are drained into
//! `<dir>/<stream>.log` files either immediately (errors, full buffers) or by
//! a background flush scheduler. Every mutation of buffers and files runs
//! under one lock shared by all streams.

mod buffer;
mod dir;
mod engine;
mod error;
mod file;
pub mod log_paths;
mod logger;
mod scheduler;

pub use buffer::{BufferStore, LogBuffer};
pub use dir::{clean_dir, prepare_log_dir, prepare_log_dir_with_fallback, FALLBACK_DIR};
pub use engine::{FlushEngine, FlushOutcome, SweepReport};
pub use error::LoggerError;
pub use file::{FileStore, LogFile};
pub use logger::{Logger, LoggerOptions};
pub use scheduler::{SchedulePeriods, MAX_PERIOD};
