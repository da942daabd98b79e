// src/engine/coordinator.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info, warn};

use crate::config::{CommandBatch, CommandSpec};
use crate::exec::ExecutorBackend;
use crate::report::Reporter;

use super::{Completion, RunOptions, RunSummary};

/// Runs every command of a batch concurrently and gathers the results.
///
/// Each command gets its own Tokio task. Units never observe each other:
/// a failure is reported and recorded, siblings keep running. All units
/// share one completion channel sized to the batch; every unit holds a
/// sender clone, so the channel closes exactly once, when the last unit is
/// done. That close is the barrier [`run`](Self::run) waits on.
pub struct Coordinator<E: ExecutorBackend> {
    executor: Arc<E>,
    reporter: Arc<Reporter>,
    options: RunOptions,
}

impl<E: ExecutorBackend> fmt::Debug for Coordinator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Coordinator<E> {
    pub fn new(executor: E, reporter: Arc<Reporter>, options: RunOptions) -> Self {
        Self {
            executor: Arc::new(executor),
            reporter,
            options,
        }
    }

    /// Execute the whole batch and return once every command has
    /// terminated. Never exits early on failure.
    pub async fn run(&self, batch: &CommandBatch) -> RunSummary {
        let specs = batch.to_shared();
        let mut summary = RunSummary::new(&specs);
        if specs.is_empty() {
            info!("empty batch; nothing to run");
            return summary;
        }

        let n = specs.len();
        info!(commands = n, max_concurrency = ?self.options.max_concurrency, "starting batch");

        // Two messages per unit; the buffer never makes a producer wait.
        let (tx, mut rx) = mpsc::channel::<Completion>(2 * n);
        let limiter = self
            .options
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        let mut handles = Vec::with_capacity(n);
        for index in 0..n {
            let unit = Unit {
                index,
                specs: Arc::clone(&specs),
                executor: Arc::clone(&self.executor),
                reporter: Arc::clone(&self.reporter),
                limiter: limiter.clone(),
                tx: tx.clone(),
            };
            handles.push(tokio::spawn(unit.run()));
        }
        // Only the units hold senders now.
        drop(tx);

        while let Some(completion) = rx.recv().await {
            match completion {
                Completion::Started { index } => summary.mark_running(index),
                Completion::Finished { index, outcome } => {
                    if let Some(err) = outcome.error() {
                        if let Err(e) = self.reporter.command_failed(err) {
                            warn!(error = %e, "failed to write failure report");
                        }
                    }
                    summary.record(index, outcome);
                }
            }
        }
        debug!("completion channel closed; all units finished");

        for (index, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                error!(index, command = %specs[index].key(), error = %e, "execution unit aborted");
            }
        }

        summary.finalize();
        info!(
            completed = summary.succeeded_count(),
            failed = summary.failed_count(),
            "batch finished"
        );
        summary
    }
}

/// One concurrent unit of work: runs a single command and reports back.
struct Unit<E: ExecutorBackend> {
    index: usize,
    specs: Arc<[CommandSpec]>,
    executor: Arc<E>,
    reporter: Arc<Reporter>,
    limiter: Option<Arc<Semaphore>>,
    tx: mpsc::Sender<Completion>,
}

impl<E: ExecutorBackend> Unit<E> {
    async fn run(self) {
        let _permit = match self.limiter {
            Some(ref limiter) => match Arc::clone(limiter).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(e) => {
                    error!(index = self.index, error = %e, "concurrency limiter closed");
                    return;
                }
            },
            None => None,
        };

        let spec = &self.specs[self.index];
        if self
            .tx
            .send(Completion::Started { index: self.index })
            .await
            .is_err()
        {
            debug!(index = self.index, "coordinator gone; dropping start notification");
        }

        if let Err(e) = self.reporter.command_started(spec) {
            warn!(command = %spec.key(), error = %e, "failed to write start banner");
        }

        let outcome = self.executor.execute(spec).await;

        if outcome.succeeded() {
            if let Err(e) = self.reporter.command_output(&outcome) {
                warn!(command = %spec.key(), error = %e, "failed to write command output");
            }
        }

        if self
            .tx
            .send(Completion::Finished {
                index: self.index,
                outcome,
            })
            .await
            .is_err()
        {
            debug!(index = self.index, "coordinator gone; dropping outcome");
        }
    }
}
