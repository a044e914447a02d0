// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod batch;
pub mod clean;
pub mod daemon;
pub mod flush;
pub mod write;

use anyhow::{Context, Result};
use logmon_storage::log_paths::is_valid_stream_name;
use logmon_storage::{Logger, LoggerOptions};

use crate::config::Settings;
use crate::exit_error::ExitError;

/// Open the logger for one command.
///
/// One-shot commands run without the background scheduler; they flush
/// explicitly before stopping.
pub fn open_logger(settings: &Settings, background_flush: bool) -> Result<Logger> {
    let options = LoggerOptions {
        background_flush,
        ..settings.options.clone()
    };
    Logger::new(&settings.dir, options).context("failed to initialize logging system")
}

/// Reject stream names that would place a file outside the log directory.
pub fn check_stream_name(name: &str) -> Result<()> {
    if is_valid_stream_name(name) {
        return Ok(());
    }
    Err(ExitError::new(
        1,
        format!("invalid stream name '{name}': must be a plain file name (-n)"),
    )
    .into())
}
