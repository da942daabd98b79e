use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use batchrun::config::CommandSpec;
use batchrun::errors::RunnerError;
use batchrun::exec::{ExecutionOutcome, ExecutorBackend};

/// What the fake should do for a given command name.
#[derive(Debug, Clone)]
pub enum Script {
    Succeed { output: String },
    Exit { code: i32, output: String },
    Panic,
}

/// A fake executor that:
/// - records which commands were "run", in start order
/// - answers each command according to its script (default: success
///   echoing the command key)
/// - optionally sleeps per command, and tracks peak concurrency.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    scripts: HashMap<String, Script>,
    delays: HashMap<String, Duration>,
    executed: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, name: &str, script: Script) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    pub fn fail(self, name: &str, code: i32, output: &str) -> Self {
        self.script(
            name,
            Script::Exit {
                code,
                output: output.to_string(),
            },
        )
    }

    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Shared view of executed command names.
    pub fn executed(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.executed)
    }

    /// Shared peak of simultaneously running commands.
    pub fn peak(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak)
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + 'a>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(spec.name().to_string());

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delays.get(spec.name()) {
                tokio::time::sleep(*delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let key = spec.key();
            match self.scripts.get(spec.name()) {
                None => {
                    let output = format!("ran {key}").into_bytes();
                    ExecutionOutcome::success(key, output, Duration::ZERO)
                }
                Some(Script::Succeed { output }) => {
                    ExecutionOutcome::success(key, output.clone().into_bytes(), Duration::ZERO)
                }
                Some(Script::Exit { code, output }) => {
                    let err = RunnerError::NonZeroExit {
                        command: key.clone(),
                        code: Some(*code),
                        output: output.clone(),
                    };
                    ExecutionOutcome::failure(key, err, output.clone().into_bytes(), Duration::ZERO)
                }
                Some(Script::Panic) => panic!("scripted panic for {key}"),
            }
        })
    }
}
