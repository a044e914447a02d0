// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logmon clean` - delete every log and rotated log in the directory

use anyhow::Result;
use tracing::debug;

use crate::commands::open_logger;
use crate::config::Settings;

pub fn handle(settings: &Settings) -> Result<()> {
    let logger = open_logger(settings, false)?;
    let removed = logger.clean();
    debug!(removed, dir = %logger.dir().display(), "clean finished");
    logger.stop();
    Ok(())
}
