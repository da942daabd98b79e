// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{CommandBatch, CommandSpec, RawCommand, RawCommandList};
use crate::errors::{Result, RunnerError};

impl TryFrom<RawCommandList> for CommandBatch {
    type Error = RunnerError;

    fn try_from(raw: RawCommandList) -> std::result::Result<Self, Self::Error> {
        let commands = raw
            .commands
            .into_iter()
            .enumerate()
            .map(|(index, cmd)| {
                validate_command(index, &cmd)?;
                Ok(into_spec(cmd))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CommandBatch::new_unchecked(commands))
    }
}

impl TryFrom<RawCommand> for CommandSpec {
    type Error = RunnerError;

    fn try_from(raw: RawCommand) -> std::result::Result<Self, Self::Error> {
        validate_command(0, &raw)?;
        Ok(into_spec(raw))
    }
}

/// Shallow, structural checks only. Whether `name` resolves to a real
/// executable is left to the executor.
fn validate_command(index: usize, cmd: &RawCommand) -> Result<()> {
    if cmd.name.trim().is_empty() {
        return Err(RunnerError::MalformedInput(format!(
            "command #{index} has an empty `name`"
        )));
    }

    if let Some(env) = &cmd.environment {
        for key in env.keys() {
            if key.is_empty() || key.contains('=') || key.contains('\0') {
                return Err(RunnerError::MalformedInput(format!(
                    "command #{index} ('{}') has an invalid environment key '{key}'",
                    cmd.name
                )));
            }
        }
    }

    Ok(())
}

fn into_spec(cmd: RawCommand) -> CommandSpec {
    let working_dir = cmd
        .working_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);

    CommandSpec::new_unchecked(
        cmd.name,
        cmd.arguments.unwrap_or_default(),
        cmd.environment.unwrap_or_default(),
        cmd.description,
        working_dir,
    )
}
