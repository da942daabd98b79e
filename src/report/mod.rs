// src/report/mod.rs

//! Human-readable progress and summary output.
//!
//! Live output (start banners, per-command output dumps) is written from
//! the execution units as they run, so blocks from different commands may
//! appear in any order. Each block is written with a single locked write,
//! so blocks never tear. The summary is rendered from a [`RunSummary`] and
//! always follows input order.

pub mod color;

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::config::{CommandBatch, CommandSpec};
use crate::engine::RunSummary;
use crate::errors::RunnerError;
use crate::exec::ExecutionOutcome;
use crate::types::CommandState;

use color::{GREEN, RED, paint};

const RULE: &str = "------------------------------------------------------------------------";
const MONKEY_RULE: &str =
    "🐒------------------------------------------------------------------------🐒";

/// Thread-safe sink for everything the runner prints.
pub struct Reporter {
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl Reporter {
    pub fn new(out: impl Write + Send + 'static, color: bool) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            color,
        }
    }

    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }

    pub fn runner_started(&self, cwd: &Path) -> io::Result<()> {
        self.emit(format!("\n{RULE}\n🐒 Runner Started in {}\n{RULE}\n", cwd.display()))
    }

    /// Banner printed when a command's process is about to launch.
    pub fn command_started(&self, spec: &CommandSpec) -> io::Result<()> {
        let dir = spec
            .working_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_default();

        let mut block = String::new();
        let _ = writeln!(block, "\n{MONKEY_RULE}");
        let _ = writeln!(block, "Running:  {}", spec.description());
        let _ = writeln!(block, "Directory: {dir}");
        let _ = writeln!(block, "Cmd: {}", spec.key());
        let _ = writeln!(block, "\n{MONKEY_RULE}");
        self.emit(block)
    }

    /// Output dump for a command that succeeded.
    pub fn command_output(&self, outcome: &ExecutionOutcome) -> io::Result<()> {
        self.emit(format!(
            "Output of '{}':\n{}\n",
            outcome.key(),
            outcome.output_lossy()
        ))
    }

    /// Full failure detail: command, underlying error and captured output.
    pub fn command_failed(&self, error: &RunnerError) -> io::Result<()> {
        let line = paint(self.color, RED, &format!("Error: {error} "));
        self.emit(format!("{line}\n"))
    }

    /// Final table in input order.
    pub fn summary(&self, summary: &RunSummary) -> io::Result<()> {
        let mut block = String::new();
        let _ = writeln!(
            block,
            "\n-------------------------Commands Summary-----------------------------------"
        );

        for entry in summary.entries() {
            match entry.state {
                CommandState::Succeeded => {
                    let text = format!(" ✔️  {} ", entry.description);
                    let _ = writeln!(block, "{}", paint(self.color, GREEN, &text));
                }
                _ => {
                    let text = format!(" ❌  Error in {}:", entry.description);
                    let _ = writeln!(block, "{} {}", paint(self.color, RED, &text), entry.key);
                }
            }
        }

        let _ = writeln!(
            block,
            "\n{} commands: {} completed, {} failed",
            summary.len(),
            summary.succeeded_count(),
            summary.failed_count()
        );
        let _ = writeln!(
            block,
            "\n-----------------------------------Done----------------------------------------"
        );
        self.emit(block)
    }

    /// Describe a batch without running it.
    pub fn dry_run(&self, batch: &CommandBatch) -> io::Result<()> {
        let mut block = String::new();
        let _ = writeln!(block, "batchrun dry-run");
        let _ = writeln!(block, "commands ({}):", batch.len());
        for spec in batch.commands() {
            let _ = writeln!(block, "  - {}", spec.description());
            let _ = writeln!(block, "      cmd: {}", spec.key());
            if let Some(dir) = spec.working_dir() {
                let _ = writeln!(block, "      cwd: {}", dir.display());
            }
            if !spec.environment().is_empty() {
                let keys: Vec<_> = spec.environment().keys().collect();
                let _ = writeln!(block, "      env: {keys:?}");
            }
        }
        self.emit(block)
    }

    fn emit(&self, block: String) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        out.write_all(block.as_bytes())?;
        out.flush()
    }
}
