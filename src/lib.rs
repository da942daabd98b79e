// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::engine::{Coordinator, RunOptions, RunSummary};
use crate::exec::ProcessExecutor;
use crate::report::Reporter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the startup banner and argument check
/// - command list loading
/// - the process executor + coordinator
/// - the summary report
///
/// Returns the process exit status.
pub async fn run(args: CliArgs) -> Result<i32> {
    let options = args.run_options(report::color::should_colorize());
    let reporter = Arc::new(Reporter::stdout(options.color));

    let cwd = std::env::current_dir().context("getting current working directory")?;
    reporter.runner_started(&cwd)?;

    let Some(path) = args.commands_file() else {
        println!("{}", cli::usage());
        return Ok(0);
    };

    let batch = load_and_validate(path)
        .with_context(|| format!("reading commands from '{}'", path.display()))?;
    info!(path = %path.display(), commands = batch.len(), "loaded command list");

    if args.dry_run {
        reporter.dry_run(&batch)?;
        debug!("dry-run complete (no execution)");
        return Ok(0);
    }

    let executor = ProcessExecutor::new(&options);
    let coordinator = Coordinator::new(executor, Arc::clone(&reporter), options);
    let summary = coordinator.run(&batch).await;

    reporter.summary(&summary)?;
    Ok(exit_code(&summary, &options))
}

/// Exit status for a finished batch.
///
/// Failed commands only change the status when `fail_on_error` is set.
pub fn exit_code(summary: &RunSummary, options: &RunOptions) -> i32 {
    if options.fail_on_error && !summary.all_succeeded() {
        1
    } else {
        0
    }
}
