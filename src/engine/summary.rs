// src/engine/summary.rs

use tracing::debug;

use crate::config::CommandSpec;
use crate::exec::ExecutionOutcome;
use crate::types::CommandState;

/// Status of one command within a [`RunSummary`].
#[derive(Debug)]
pub struct SummaryEntry {
    pub key: String,
    pub description: String,
    pub state: CommandState,
    pub outcome: Option<ExecutionOutcome>,
}

/// Aggregate of all outcomes for a batch, indexed by input position.
///
/// Built incrementally while outcomes arrive; [`finalize`](Self::finalize)
/// marks anything that never reported success as failed.
#[derive(Debug, Default)]
pub struct RunSummary {
    entries: Vec<SummaryEntry>,
}

impl RunSummary {
    pub fn new(specs: &[CommandSpec]) -> Self {
        let entries = specs
            .iter()
            .map(|spec| SummaryEntry {
                key: spec.key(),
                description: spec.description(),
                state: CommandState::Pending,
                outcome: None,
            })
            .collect();
        Self { entries }
    }

    pub fn mark_running(&mut self, index: usize) {
        self.transition(index, CommandState::Running);
    }

    /// Record a finished outcome. A second outcome for the same command is
    /// ignored.
    pub fn record(&mut self, index: usize, outcome: ExecutionOutcome) {
        let next = if outcome.succeeded() {
            CommandState::Succeeded
        } else {
            CommandState::Failed
        };
        if self.transition(index, next) {
            if let Some(entry) = self.entries.get_mut(index) {
                entry.outcome = Some(outcome);
            }
        }
    }

    /// Mark every command without a terminal state as failed.
    pub fn finalize(&mut self) {
        for entry in &mut self.entries {
            if !entry.state.is_terminal() {
                debug!(command = %entry.key, state = %entry.state, "no outcome observed; marking failed");
                entry.state = CommandState::Failed;
            }
        }
    }

    fn transition(&mut self, index: usize, next: CommandState) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            debug!(index, "outcome for unknown command index ignored");
            return false;
        };
        if !entry.state.can_transition_to(next) {
            debug!(command = %entry.key, from = %entry.state, to = %next, "ignoring state transition");
            return false;
        }
        entry.state = next;
        true
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn state(&self, index: usize) -> Option<CommandState> {
        self.entries.get(index).map(|e| e.state)
    }

    pub fn outcome(&self, index: usize) -> Option<&ExecutionOutcome> {
        self.entries.get(index).and_then(|e| e.outcome.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == CommandState::Succeeded)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.succeeded_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}
