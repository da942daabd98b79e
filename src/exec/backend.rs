// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The coordinator hands each command to an `ExecutorBackend` instead of
//! spawning processes itself. Production uses
//! [`ProcessExecutor`](super::ProcessExecutor); tests provide backends that
//! script outcomes without touching the OS.

use std::future::Future;
use std::pin::Pin;

use crate::config::CommandSpec;
use crate::exec::ExecutionOutcome;

/// Trait abstracting how a single command is run to completion.
///
/// Implementations must never fail the whole batch: every error is folded
/// into the returned [`ExecutionOutcome`].
pub trait ExecutorBackend: Send + Sync + 'static {
    fn execute<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + 'a>>;
}
