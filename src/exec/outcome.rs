// src/exec/outcome.rs

use std::borrow::Cow;
use std::time::Duration;

use crate::errors::RunnerError;

/// Result of running one command. Created once by an executor and never
/// modified afterwards.
#[derive(Debug)]
pub struct ExecutionOutcome {
    key: String,
    output: Vec<u8>,
    elapsed: Duration,
    error: Option<RunnerError>,
}

impl ExecutionOutcome {
    pub fn success(key: impl Into<String>, output: Vec<u8>, elapsed: Duration) -> Self {
        Self {
            key: key.into(),
            output,
            elapsed,
            error: None,
        }
    }

    pub fn failure(
        key: impl Into<String>,
        error: RunnerError,
        output: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        Self {
            key: key.into(),
            output,
            elapsed,
            error: Some(error),
        }
    }

    /// Identity of the originating command (`name [args]`).
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Present iff the command did not succeed.
    pub fn error(&self) -> Option<&RunnerError> {
        self.error.as_ref()
    }

    /// Combined stdout + stderr, in the order the chunks arrived.
    pub fn combined_output(&self) -> &[u8] {
        &self.output
    }

    pub fn output_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
