// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logmon write` - append one entry and flush it

use anyhow::Result;
use clap::Args;

use crate::commands::{check_stream_name, open_logger};
use crate::config::Settings;
use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Entry text
    #[arg(short = 'm', long = "message")]
    pub message: Option<String>,
}

pub fn handle(args: WriteArgs, settings: &Settings) -> Result<()> {
    let Some(message) = args.message.filter(|m| !m.is_empty()) else {
        return Err(ExitError::new(1, "writing a log entry requires a message (-m)").into());
    };

    check_stream_name(&settings.name)?;
    let logger = open_logger(settings, false)?;
    logger.write(&settings.name, settings.level, &message);
    logger.flush(&settings.name);
    logger.stop();
    Ok(())
}
