// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ExecutorBackend` trait the coordinator talks
//!   to, so tests can swap in a fake executor.
//! - [`process`] is the production backend built on `tokio::process`.
//! - [`outcome`] holds the per-command result record.
//! - [`workdir`] resolves configured working directories.

pub mod backend;
pub mod outcome;
pub mod process;
pub mod workdir;

pub use backend::ExecutorBackend;
pub use outcome::ExecutionOutcome;
pub use process::ProcessExecutor;
pub use workdir::{resolve_against, resolve_working_dir};
