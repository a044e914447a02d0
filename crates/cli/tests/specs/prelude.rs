// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Returns the path to the logmon binary.
pub fn logmon_binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin("logmon")
}

/// A scratch log directory plus helpers to inspect it.
pub struct Project {
    root: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn logs(&self) -> PathBuf {
        self.root.path().join("logs")
    }

    /// Write a file relative to the project root.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Contents of `<logs>/<stream>.log`, empty when absent.
    pub fn log(&self, stream: &str) -> String {
        std::fs::read_to_string(self.logs().join(format!("{stream}.log"))).unwrap_or_default()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.logs().join(rel).exists()
    }

    /// CLI builder pointed at this project's log directory.
    pub fn cli(&self) -> CliBuilder {
        CliBuilder::new()
            .pwd(self.path())
            .args(&["-d", &self.logs().to_string_lossy()])
    }
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(logmon_binary());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Keep the caller's environment from redirecting output.
        cmd.env_remove("LOGMON_DIR");
        cmd.env_remove("LOGMON_CONFIG");
        cmd.env_remove("RUST_LOG");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect exit code 1
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(1),
            "expected exit code 1\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

/// Strip the `YYYY-MM-DD HH:MM:SS ` prefix from each entry.
pub fn entries(log: &str) -> Vec<String> {
    log.lines()
        .map(|line| {
            assert!(line.len() > 20, "short entry: {line}");
            line[20..].to_string()
        })
        .collect()
}
