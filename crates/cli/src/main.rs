// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logmon - buffered, rotating log writer

mod commands;
mod config;
mod env;
mod exit_error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{batch, clean, daemon, flush, write};

use crate::config::{GlobalArgs, Settings};
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "logmon",
    version,
    about = "Buffered, rotating log writer",
    after_help = "Without a command, runs the daemon."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run in the foreground until SIGTERM or SIGINT
    Daemon,
    /// Append one entry at the configured level and flush it
    Write(write::WriteArgs),
    /// Ingest a batch file and flush it
    Batch(batch::BatchArgs),
    /// Flush every stream to disk
    Flush,
    /// Delete all log and rotated log files
    Clean,
}

impl Commands {
    /// Default tracing filter when RUST_LOG is unset.
    fn default_filter(&self) -> &'static str {
        match self {
            Commands::Daemon => "info",
            _ => "warn",
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e.downcast_ref::<ExitError>().map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Render an error and its causes on one line as `top: cause: cause`.
///
/// A cause whose text already appears in the rendered line is skipped, so
/// thiserror variants that embed their source are not repeated.
fn format_error(err: &anyhow::Error) -> String {
    let mut line = err.to_string();
    for cause in err.chain().skip(1).map(ToString::to_string) {
        if !line.contains(&cause) {
            line.push_str(": ");
            line.push_str(&cause);
        }
    }
    line
}

async fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => {
            e.print()?;
            return Ok(());
        }
        Err(e) => {
            e.print()?;
            return Err(ExitError::silent(1).into());
        }
    };

    let command = cli.command.unwrap_or(Commands::Daemon);
    let _log_guard = setup_logging(command.default_filter());

    let settings = Settings::resolve(&cli.global)?;

    match command {
        Commands::Daemon => daemon::run(&settings).await,
        Commands::Write(args) => write::handle(args, &settings),
        Commands::Batch(args) => batch::handle(args, &settings),
        Commands::Flush => flush::handle(&settings),
        Commands::Clean => clean::handle(&settings),
    }
}

/// Route diagnostics to stderr; the guard drains them when dropped.
fn setup_logging(default_filter: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(false)
                .with_ansi(false),
        )
        .init();

    guard
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
