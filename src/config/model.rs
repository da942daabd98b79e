// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

/// One command record as it appears in the input file.
///
/// JSON form:
///
/// ```json
/// {
///   "name": "cargo",
///   "arguments": ["build", "--release"],
///   "environment": {"RUSTFLAGS": "-Dwarnings"},
///   "description": "release build",
///   "cwd": "server"
/// }
/// ```
///
/// The TOML form is the same record as a `[[command]]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCommand {
    /// Executable to run. Required and non-empty.
    pub name: String,

    /// Arguments passed verbatim; `null` is treated like an empty list.
    #[serde(default)]
    pub arguments: Option<Vec<String>>,

    /// Extra environment variables layered on top of the inherited ones.
    #[serde(default)]
    pub environment: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub description: Option<String>,

    /// Working directory; relative paths are resolved at execution time.
    #[serde(default, rename = "cwd")]
    pub working_dir: Option<String>,
}

/// Raw, unvalidated command list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommandList {
    pub commands: Vec<RawCommand>,
}

/// TOML wrapper: `[[command]]` entries.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TomlCommandFile {
    #[serde(default)]
    pub command: Vec<RawCommand>,
}

/// Immutable description of one external program invocation.
///
/// Only constructed through validation (see `validate.rs`), so `name` is
/// always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    name: String,
    arguments: Vec<String>,
    environment: BTreeMap<String, String>,
    description: Option<String>,
    working_dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Build a spec without checking invariants. Callers go through
    /// `TryFrom<RawCommand>` instead.
    pub(crate) fn new_unchecked(
        name: String,
        arguments: Vec<String>,
        environment: BTreeMap<String, String>,
        description: Option<String>,
        working_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            name,
            arguments,
            environment,
            description,
            working_dir,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Stable identity string: `name [arg1 arg2]`.
    pub fn key(&self) -> String {
        format!("{} [{}]", self.name, self.arguments.join(" "))
    }

    /// Human-readable label; falls back to [`key`](Self::key).
    pub fn description(&self) -> String {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => self.key(),
        }
    }
}

/// Validated batch of commands, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBatch {
    commands: Vec<CommandSpec>,
}

impl CommandBatch {
    pub(crate) fn new_unchecked(commands: Vec<CommandSpec>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Freeze the batch for sharing across concurrent execution units.
    pub fn to_shared(&self) -> Arc<[CommandSpec]> {
        Arc::from(self.commands.as_slice())
    }
}
