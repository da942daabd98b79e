// src/exec/process.rs

//! Production executor: runs one command as an OS process.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::CommandSpec;
use crate::engine::RunOptions;
use crate::errors::RunnerError;
use crate::exec::workdir::{resolve_against, resolve_working_dir};
use crate::exec::{ExecutionOutcome, ExecutorBackend};

const READ_CHUNK: usize = 8 * 1024;

/// Runs commands with `tokio::process`, capturing stdout and stderr into a
/// single buffer.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
    base_dir: Option<PathBuf>,
}

impl ProcessExecutor {
    pub fn new(options: &RunOptions) -> Self {
        Self {
            timeout: options.timeout,
            base_dir: None,
        }
    }

    /// Resolve relative working directories against `dir` instead of the
    /// process's current directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, spec: &CommandSpec) -> ExecutionOutcome {
        let key = spec.key();
        let started = Instant::now();

        let working_dir = match &self.base_dir {
            Some(base) => Ok(spec.working_dir().map(|dir| resolve_against(dir, base))),
            None => resolve_working_dir(spec.working_dir()),
        };
        let working_dir = match working_dir {
            Ok(dir) => dir,
            Err(source) => {
                let err = RunnerError::PathResolution {
                    command: key.clone(),
                    dir: spec.working_dir().unwrap_or(Path::new(".")).to_path_buf(),
                    source,
                };
                return ExecutionOutcome::failure(key, err, Vec::new(), started.elapsed());
            }
        };

        let mut cmd = Command::new(spec.name());
        cmd.args(spec.arguments())
            .envs(spec.environment())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &working_dir {
            cmd.current_dir(dir);
        }

        info!(command = %key, cwd = ?working_dir, "starting command process");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                warn!(command = %key, error = %source, "failed to launch command");
                let err = RunnerError::Launch {
                    command: key.clone(),
                    source,
                };
                return ExecutionOutcome::failure(key, err, Vec::new(), started.elapsed());
            }
        };

        // A deadline past what `Instant` can represent is no deadline.
        let deadline = self.timeout.and_then(|t| started.checked_add(t));
        let mut output = Vec::new();
        let result = wait_with_combined_output(&mut child, deadline, &mut output).await;
        let elapsed = started.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;

        match result {
            Ok(Finished::Exited(status)) if status.success() => {
                info!(command = %key, exit_code = 0, elapsed_ms, "command process exited");
                ExecutionOutcome::success(key, output, elapsed)
            }
            Ok(Finished::Exited(status)) => {
                info!(
                    command = %key,
                    exit_code = ?status.code(),
                    elapsed_ms,
                    "command process exited with failure"
                );
                let err = RunnerError::NonZeroExit {
                    command: key.clone(),
                    code: status.code(),
                    output: String::from_utf8_lossy(&output).into_owned(),
                };
                ExecutionOutcome::failure(key, err, output, elapsed)
            }
            Ok(Finished::TimedOut) => {
                let after = self.timeout.unwrap_or(elapsed);
                warn!(command = %key, ?after, "command timed out; killing process");
                if let Err(e) = child.kill().await {
                    warn!(command = %key, error = %e, "failed to kill timed out process");
                }
                let err = RunnerError::TimedOut {
                    command: key.clone(),
                    after,
                    output: String::from_utf8_lossy(&output).into_owned(),
                };
                ExecutionOutcome::failure(key, err, output, elapsed)
            }
            Err(e) => {
                warn!(command = %key, error = %e, "lost contact with command process");
                let err = RunnerError::Other(
                    anyhow::Error::new(e).context(format!("waiting for '{key}'")),
                );
                ExecutionOutcome::failure(key, err, output, elapsed)
            }
        }
    }
}

impl ExecutorBackend for ProcessExecutor {
    fn execute<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + 'a>> {
        Box::pin(self.run(spec))
    }
}

enum Finished {
    Exited(std::process::ExitStatus),
    TimedOut,
}

/// Drain stdout and stderr into `output` as chunks arrive, then wait for the
/// child to exit. Returns `TimedOut` once `deadline` passes; whatever was
/// captured up to that point stays in `output`.
async fn wait_with_combined_output(
    child: &mut Child,
    deadline: Option<Instant>,
    output: &mut Vec<u8>,
) -> io::Result<Finished> {
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let mut out_buf = vec![0u8; READ_CHUNK];
    let mut err_buf = vec![0u8; READ_CHUNK];

    let expired = async {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(expired);

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            n = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => {
                match n? {
                    0 => stdout = None,
                    n => output.extend_from_slice(&out_buf[..n]),
                }
            }
            n = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => {
                match n? {
                    0 => stderr = None,
                    n => output.extend_from_slice(&err_buf[..n]),
                }
            }
            _ = &mut expired => return Ok(Finished::TimedOut),
        }
    }
    debug!(bytes = output.len(), "command output streams closed");

    tokio::select! {
        status = child.wait() => Ok(Finished::Exited(status?)),
        _ = &mut expired => Ok(Finished::TimedOut),
    }
}

async fn read_chunk<R: AsyncRead + Unpin>(
    reader: &mut Option<R>,
    buf: &mut [u8],
) -> io::Result<usize> {
    match reader {
        Some(r) => r.read(buf).await,
        None => Ok(0),
    }
}
