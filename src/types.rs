use std::fmt;
use std::time::Duration;

/// Lifecycle of one command within a batch.
///
/// `Pending -> Running -> {Succeeded, Failed}`. The two terminal states are
/// absorbing; see [`CommandState::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl CommandState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CommandState::Succeeded | CommandState::Failed)
    }

    pub fn can_transition_to(self, next: CommandState) -> bool {
        match (self, next) {
            (CommandState::Pending, CommandState::Running) => true,
            // A unit may finish before its `Running` notification is observed.
            (CommandState::Pending | CommandState::Running, CommandState::Succeeded) => true,
            (CommandState::Pending | CommandState::Running, CommandState::Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CommandState::Pending => "pending",
            CommandState::Running => "running",
            CommandState::Succeeded => "completed",
            CommandState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Parse durations like `500ms`, `30s`, `5m`, `1h`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let duration = match unit.as_str() {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => Duration::from_secs(scaled(value, 60)?),
        "h" => Duration::from_secs(scaled(value, 60 * 60)?),
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}

fn scaled(value: u64, factor: u64) -> Result<u64, String> {
    value
        .checked_mul(factor)
        .ok_or_else(|| format!("duration too large: {value} x {factor}s"))
}
