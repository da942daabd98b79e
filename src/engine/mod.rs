// src/engine/mod.rs

//! Batch orchestration.
//!
//! - [`coordinator`] fans a batch out to one execution unit per command and
//!   fans the results back in over a single completion channel.
//! - [`summary`] accumulates per-command state into a [`RunSummary`].

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::exec::ExecutionOutcome;

/// Behaviour knobs for one run. Passed explicitly into constructors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Upper bound on commands running at once. `None` launches every
    /// command immediately.
    pub max_concurrency: Option<NonZeroUsize>,
    /// Kill a command that runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Exit with status 1 when any command failed.
    pub fail_on_error: bool,
    /// Emit ANSI colors in the report.
    pub color: bool,
}

/// Messages flowing from execution units back to the coordinator.
#[derive(Debug)]
pub enum Completion {
    /// The unit acquired its slot and is about to launch the process.
    Started { index: usize },
    /// The unit finished, successfully or not.
    Finished {
        index: usize,
        outcome: ExecutionOutcome,
    },
}

pub mod coordinator;
pub mod summary;

pub use coordinator::Coordinator;
pub use summary::{RunSummary, SummaryEntry};
