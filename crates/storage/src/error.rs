// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for logger initialization

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort logger startup.
///
/// Failures after startup (rotation, writes, size lookups) are reported
/// through tracing and never surface as errors.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
