// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{CommandBatch, RawCommand, RawCommandList, TomlCommandFile};
use crate::errors::{Result, RunnerError};

/// Serialization format of a command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Top-level JSON array of command records.
    Json,
    /// `[[command]]` tables.
    Toml,
}

impl InputFormat {
    /// `.toml` selects TOML; anything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => InputFormat::Toml,
            _ => InputFormat::Json,
        }
    }
}

/// Read and deserialize a command list without validating it.
///
/// An unreadable file is an `IoError`; content that does not deserialize
/// is `MalformedInput`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCommandList> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let format = InputFormat::from_path(path);
    debug!(path = %path.display(), ?format, "parsing command list");

    parse_str(&contents, format)
}

/// Deserialize a command list from an in-memory string.
pub fn parse_str(contents: &str, format: InputFormat) -> Result<RawCommandList> {
    let commands = match format {
        InputFormat::Json => serde_json::from_str::<Vec<RawCommand>>(contents)
            .map_err(|e| RunnerError::MalformedInput(e.to_string()))?,
        InputFormat::Toml => {
            toml::from_str::<TomlCommandFile>(contents)
                .map_err(|e| RunnerError::MalformedInput(e.to_string()))?
                .command
        }
    };

    Ok(RawCommandList { commands })
}

/// Load a command list from disk and validate it.
///
/// This is the entry point the rest of the crate uses. Nothing is executed
/// when this fails.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<CommandBatch> {
    let raw = load_from_path(&path)?;
    CommandBatch::try_from(raw)
}
