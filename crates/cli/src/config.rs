// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration.
//!
//! Precedence, highest first: command-line flags, environment
//! (`LOGMON_DIR`, `LOGMON_CONFIG`), the optional TOML file, then defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use logmon_core::Severity;
use logmon_storage::{LoggerOptions, SchedulePeriods, MAX_PERIOD};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::env;

/// Stream written when `-n` is not given.
pub const DEFAULT_STREAM: &str = "system";

/// Flags shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Log directory
    #[arg(short = 'd', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// Log level (1=ERROR, 2=WARN, 3=INFO, 4=DEBUG)
    #[arg(
        short = 'l',
        long = "level",
        global = true,
        allow_negative_numbers = true
    )]
    pub level: Option<i64>,

    /// Stream name for write and batch [default: system]
    #[arg(short = 'n', long = "name", global = true)]
    pub name: Option<String>,

    /// Enable low-power mode (fewer, larger writes)
    #[arg(short = 'p', long = "low-power", global = true)]
    pub low_power: bool,

    /// TOML config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,
}

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub dir: Option<PathBuf>,
    pub level: Option<i64>,
    pub name: Option<String>,
    pub low_power: Option<bool>,
    pub max_idle_ms: Option<u64>,
    pub buffer_max_bytes: Option<usize>,
    pub log_size_limit: Option<u64>,
    pub flush_interval_secs: Option<u64>,
    pub low_power_flush_interval_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dir: PathBuf,
    pub level: Severity,
    pub name: String,
    pub options: LoggerOptions,
}

impl Settings {
    /// Resolve from flags, the process environment and the config file.
    pub fn resolve(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let file = match args.config.clone().or_else(env::config_path) {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::layer(args, env::log_dir(), file, env::default_log_dir()))
    }

    /// Merge already-loaded layers.
    pub fn layer(
        args: &GlobalArgs,
        env_dir: Option<PathBuf>,
        file: FileConfig,
        default_dir: PathBuf,
    ) -> Self {
        let dir = args
            .dir
            .clone()
            .or(env_dir)
            .or(file.dir)
            .unwrap_or(default_dir);
        let level = level_or_default(args.level.or(file.level));
        let name = args
            .name
            .clone()
            .or(file.name)
            .unwrap_or_else(|| DEFAULT_STREAM.to_string());

        let defaults = LoggerOptions::default();
        let periods = SchedulePeriods {
            normal: interval_or_default(
                "flush_interval_secs",
                file.flush_interval_secs,
                defaults.periods.normal,
            ),
            low_power: interval_or_default(
                "low_power_flush_interval_secs",
                file.low_power_flush_interval_secs,
                defaults.periods.low_power,
            ),
        };
        let options = LoggerOptions {
            log_level: level,
            log_size_limit: file.log_size_limit.unwrap_or(defaults.log_size_limit),
            max_idle_ms: file.max_idle_ms.unwrap_or(defaults.max_idle_ms),
            buffer_max_bytes: file.buffer_max_bytes.unwrap_or(defaults.buffer_max_bytes),
            low_power: args.low_power || file.low_power.unwrap_or(false),
            periods,
            background_flush: defaults.background_flush,
        };

        Self {
            dir,
            level,
            name,
            options,
        }
    }
}

/// Map a numeric level to a severity, warning and using INFO when out of range.
pub fn level_or_default(level: Option<i64>) -> Severity {
    let Some(level) = level else {
        return Severity::default();
    };
    Severity::from_level(level).unwrap_or_else(|| {
        warn!(level, "log level must be between 1-4, using INFO");
        Severity::Info
    })
}

/// Validate a flush interval: zero means the default, values above a day are capped.
fn interval_or_default(key: &str, secs: Option<u64>, default: Duration) -> Duration {
    match secs {
        None => default,
        Some(0) => {
            warn!(
                key,
                default_secs = default.as_secs(),
                "flush interval must be positive, using default",
            );
            default
        }
        Some(secs) if secs > MAX_PERIOD.as_secs() => {
            warn!(
                key,
                secs,
                max_secs = MAX_PERIOD.as_secs(),
                "flush interval too large, capping",
            );
            MAX_PERIOD
        }
        Some(secs) => Duration::from_secs(secs),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
