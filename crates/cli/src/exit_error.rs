// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying an explicit process exit code through `anyhow`.

use std::fmt;

/// Returned from command handlers to pick the exit code.
///
/// An empty message means the failure was already reported and nothing more
/// is printed.
#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn silent(code: i32) -> Self {
        Self::new(code, String::new())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
