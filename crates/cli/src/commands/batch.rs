// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logmon batch` - ingest a `level|message` file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use logmon_core::parse_batch;
use tracing::{debug, warn};

use crate::commands::{check_stream_name, open_logger};
use crate::config::Settings;
use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input file, one `level|message` entry per line
    #[arg(short = 'b', long = "batch-file")]
    pub batch_file: Option<PathBuf>,
}

pub fn handle(args: BatchArgs, settings: &Settings) -> Result<()> {
    check_stream_name(&settings.name)?;
    let Some(path) = args.batch_file else {
        return Err(ExitError::new(1, "batch write requires an input file (-b)").into());
    };
    let bytes = std::fs::read(&path).map_err(|e| {
        ExitError::new(
            1,
            format!("cannot open batch file {}: {e}", path.display()),
        )
    })?;

    let parsed = parse_batch(&String::from_utf8_lossy(&bytes));
    for warning in &parsed.warnings {
        warn!(file = %path.display(), "batch file {warning}");
    }

    let logger = open_logger(settings, false)?;
    if !parsed.entries.is_empty() {
        logger.batch_write(&settings.name, &parsed.entries);
        logger.flush(&settings.name);
    }
    logger.stop();

    debug!(
        stream = %settings.name,
        entries = parsed.entries.len(),
        skipped = parsed.warnings.len(),
        "batch ingested",
    );
    Ok(())
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
