// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logmon daemon` - run until SIGTERM or SIGINT
//!
//! The background scheduler flushes idle buffers while the daemon waits. On
//! a signal every stream is flushed, a shutdown entry is written and flushed,
//! and the logger stops.

use anyhow::Result;
use logmon_core::Severity;
use logmon_storage::Logger;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::commands::open_logger;
use crate::config::Settings;

/// Stream that receives the daemon's own lifecycle entries.
pub const DAEMON_STREAM: &str = "system";

pub const STOPPING_MESSAGE: &str = "Logging system daemon is stopping...";

pub fn startup_message(low_power: bool) -> String {
    let mut message = String::from("Logging system daemon started");
    if low_power {
        message.push_str(" (Low power mode)");
    }
    message
}

pub async fn run(settings: &Settings) -> Result<()> {
    let logger = open_logger(settings, true)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    logger.write(
        DAEMON_STREAM,
        Severity::Info,
        &startup_message(settings.options.low_power),
    );
    info!(
        dir = %logger.dir().display(),
        low_power = settings.options.low_power,
        "daemon ready",
    );

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    tokio::task::spawn_blocking(move || shutdown(logger)).await?;

    info!("daemon stopped");
    Ok(())
}

/// Flush, record the shutdown entry, flush again and stop.
///
/// Performs synchronous file I/O; run it off the async runtime.
pub fn shutdown(logger: Logger) {
    logger.flush_all();
    logger.write(DAEMON_STREAM, Severity::Info, STOPPING_MESSAGE);
    logger.flush_all();
    logger.stop();
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
