// src/errors.rs

//! Crate-wide error type.
//!
//! Batch-level variants (`MalformedInput`, `IoError`) abort a run before any
//! command starts. The per-command variants are never propagated with `?`
//! past the executor; they travel inside an
//! [`ExecutionOutcome`](crate::exec::ExecutionOutcome) instead.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Malformed command list: {0}")]
    MalformedInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("🥺 error getting full path for working directory '{}' of '{command}': {source}", .dir.display())]
    PathResolution {
        command: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("exec error: '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("exec error: '{command}': \n{} \n{output}", describe_exit(.code))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("exec error: '{command}': \ntimed out after {after:?} \n{output}")]
    TimedOut {
        command: String,
        after: Duration,
        output: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RunnerError>;
