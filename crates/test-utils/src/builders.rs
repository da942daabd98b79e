#![allow(dead_code)]

use std::collections::BTreeMap;

use batchrun::config::{CommandBatch, CommandSpec, RawCommand, RawCommandList};

/// Builder for `CommandBatch` to simplify test setup.
pub struct BatchBuilder {
    raw: RawCommandList,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawCommandList::default(),
        }
    }

    pub fn with_command(mut self, cmd: CommandBuilder) -> Self {
        self.raw.commands.push(cmd.raw());
        self
    }

    pub fn raw(self) -> RawCommandList {
        self.raw
    }

    pub fn build(self) -> CommandBatch {
        CommandBatch::try_from(self.raw).expect("Failed to build valid batch from builder")
    }
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single command record.
pub struct CommandBuilder {
    raw: RawCommand,
}

impl CommandBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            raw: RawCommand {
                name: name.to_string(),
                arguments: None,
                environment: None,
                description: None,
                working_dir: None,
            },
        }
    }

    /// `sh -c <script>`.
    pub fn shell(script: &str) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.raw
            .arguments
            .get_or_insert_with(Vec::new)
            .push(arg.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.raw
            .environment
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.raw.description = Some(text.to_string());
        self
    }

    pub fn cwd(mut self, dir: &str) -> Self {
        self.raw.working_dir = Some(dir.to_string());
        self
    }

    pub fn raw(self) -> RawCommand {
        self.raw
    }

    pub fn build(self) -> CommandSpec {
        CommandSpec::try_from(self.raw).expect("Failed to build valid command from builder")
    }
}
