// src/cli.rs

//! CLI argument parsing using `clap`.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{CommandFactory, Parser, ValueEnum};

use crate::engine::RunOptions;
use crate::types::parse_duration;

/// Command-line arguments for `batchrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "batchrun",
    version,
    about = "Run a list of commands in parallel and summarize the results.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the command list (JSON array, or `[[command]]` tables in a
    /// `.toml` file).
    ///
    /// Exactly one is expected; anything else prints usage and exits.
    #[arg(value_name = "COMMANDS_FILE")]
    pub commands: Vec<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BATCHRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Run at most N commands at the same time (default: all at once).
    #[arg(short = 'j', long, value_name = "N")]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Kill any command running longer than this (e.g. `30s`, `5m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Exit with status 1 if any command failed.
    ///
    /// Without this flag the exit status is 0 regardless of command results.
    #[arg(long)]
    pub fail_on_error: bool,

    /// Disable ANSI colors in the summary.
    #[arg(long)]
    pub no_color: bool,

    /// Parse + validate, print the batch, but don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The single command list path, or `None` when zero or several were
    /// given.
    pub fn commands_file(&self) -> Option<&Path> {
        match self.commands.as_slice() {
            [path] => Some(path.as_path()),
            _ => None,
        }
    }

    pub fn run_options(&self, color_available: bool) -> RunOptions {
        RunOptions {
            max_concurrency: self.max_concurrency,
            timeout: self.timeout,
            fail_on_error: self.fail_on_error,
            color: color_available && !self.no_color,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Render the usage/help text.
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}
