// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logmon flush`

use anyhow::Result;

use crate::commands::open_logger;
use crate::config::Settings;

pub fn handle(settings: &Settings) -> Result<()> {
    let logger = open_logger(settings, false)?;
    logger.flush_all();
    logger.stop();
    Ok(())
}
