// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch input parsing.
//!
//! One entry per line: `<level>|<message>`. `<level>` is an integer 1-4 or
//! one of `ERROR`, `WARN`, `INFO`, `DEBUG`. Blank lines and lines starting
//! with `#` are ignored. Problems with a single line never fail the batch;
//! they are reported as [`BatchWarning`]s.

use std::fmt;

use crate::Severity;

/// A parsed batch line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub severity: Severity,
    pub message: String,
}

impl BatchEntry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// A per-line diagnostic produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchWarning {
    /// The line has no `|` separator and was skipped.
    MissingSeparator { line: usize, text: String },
    /// The level is numeric but outside 1-4; INFO was used.
    LevelOutOfRange { line: usize, level: String },
    /// The level is neither numeric nor a known token; INFO was used.
    UnrecognizedLevel { line: usize, level: String },
}

impl BatchWarning {
    pub fn line(&self) -> usize {
        match self {
            BatchWarning::MissingSeparator { line, .. }
            | BatchWarning::LevelOutOfRange { line, .. }
            | BatchWarning::UnrecognizedLevel { line, .. } => *line,
        }
    }
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchWarning::MissingSeparator { line, text } => {
                write!(f, "line {line}: missing '|' separator, skipped: {text}")
            }
            BatchWarning::LevelOutOfRange { line, level } => {
                write!(f, "line {line}: level {level} out of range, using INFO")
            }
            BatchWarning::UnrecognizedLevel { line, level } => {
                write!(f, "line {line}: unrecognized level ({level}), using INFO")
            }
        }
    }
}

/// Result of parsing a batch input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchParse {
    pub entries: Vec<BatchEntry>,
    pub warnings: Vec<BatchWarning>,
}

/// Parse batch input text into entries, collecting per-line warnings.
pub fn parse_batch(input: &str) -> BatchParse {
    let mut parsed = BatchParse::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((level_token, message)) = line.split_once('|') else {
            parsed.warnings.push(BatchWarning::MissingSeparator {
                line: line_no,
                text: line.to_string(),
            });
            continue;
        };

        let level_token = level_token.trim_matches([' ', '\t']);
        let severity = match parse_level(level_token) {
            Ok(severity) => severity,
            Err(problem) => {
                let level = level_token.to_string();
                parsed.warnings.push(match problem {
                    LevelProblem::OutOfRange => BatchWarning::LevelOutOfRange {
                        line: line_no,
                        level,
                    },
                    LevelProblem::Unrecognized => BatchWarning::UnrecognizedLevel {
                        line: line_no,
                        level,
                    },
                });
                Severity::Info
            }
        };

        let message = message.trim_start_matches([' ', '\t']);
        parsed.entries.push(BatchEntry::new(severity, message));
    }

    parsed
}

enum LevelProblem {
    OutOfRange,
    Unrecognized,
}

fn parse_level(token: &str) -> Result<Severity, LevelProblem> {
    if is_integer(token) {
        return token
            .parse::<i64>()
            .ok()
            .and_then(Severity::from_level)
            .ok_or(LevelProblem::OutOfRange);
    }
    token
        .parse::<Severity>()
        .map_err(|_| LevelProblem::Unrecognized)
}

fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
