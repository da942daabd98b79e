// tests/summary_properties.rs

use std::time::Duration;

use proptest::prelude::*;

use batchrun::errors::RunnerError;
use batchrun::exec::ExecutionOutcome;
use batchrun::engine::RunSummary;
use batchrun::types::CommandState;
use batchrun_test_utils::builders::{BatchBuilder, CommandBuilder};

fn outcome(key: &str, ok: bool) -> ExecutionOutcome {
    if ok {
        ExecutionOutcome::success(key, Vec::new(), Duration::ZERO)
    } else {
        let err = RunnerError::NonZeroExit {
            command: key.to_string(),
            code: Some(1),
            output: String::new(),
        };
        ExecutionOutcome::failure(key, err, Vec::new(), Duration::ZERO)
    }
}

proptest! {
    /// Whatever order outcomes arrive in, the summary has one entry per
    /// command, in input order, classified by that command's own outcome.
    #[test]
    fn test_summary_is_input_ordered_for_any_completion_order(
        results in proptest::collection::vec(any::<bool>(), 0..20),
        seed in any::<u64>(),
    ) {
        let mut builder = BatchBuilder::new();
        for i in 0..results.len() {
            builder = builder.with_command(CommandBuilder::new(&format!("cmd{i}")));
        }
        let batch = builder.build();
        let mut summary = RunSummary::new(batch.commands());

        // Deterministic shuffle of completion order.
        let mut order: Vec<usize> = (0..results.len()).collect();
        let mut state = seed;
        for i in (1..order.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            order.swap(i, j);
        }

        for index in order {
            summary.mark_running(index);
            let key = batch.commands()[index].key();
            summary.record(index, outcome(&key, results[index]));
        }
        summary.finalize();

        prop_assert_eq!(summary.len(), results.len());
        for (i, entry) in summary.entries().iter().enumerate() {
            prop_assert_eq!(&entry.key, &format!("cmd{i} []"));
            let expected = if results[i] { CommandState::Succeeded } else { CommandState::Failed };
            prop_assert_eq!(entry.state, expected);
        }
        prop_assert_eq!(summary.succeeded_count(), results.iter().filter(|r| **r).count());
    }

    /// Terminal states are absorbing: a late second outcome never flips one.
    #[test]
    fn test_terminal_states_are_absorbing(first in any::<bool>(), second in any::<bool>()) {
        let batch = BatchBuilder::new().with_command(CommandBuilder::new("only")).build();
        let mut summary = RunSummary::new(batch.commands());

        summary.record(0, outcome("only []", first));
        summary.mark_running(0);
        summary.record(0, outcome("only []", second));

        let expected = if first { CommandState::Succeeded } else { CommandState::Failed };
        prop_assert_eq!(summary.state(0), Some(expected));
    }
}

#[test]
fn test_unreported_commands_are_failed_after_finalize() {
    let batch = BatchBuilder::new()
        .with_command(CommandBuilder::new("a"))
        .with_command(CommandBuilder::new("b"))
        .build();
    let mut summary = RunSummary::new(batch.commands());

    summary.mark_running(1);
    summary.record(0, outcome("a []", true));
    summary.finalize();

    assert_eq!(summary.state(0), Some(CommandState::Succeeded));
    assert_eq!(summary.state(1), Some(CommandState::Failed));
    assert!(!summary.all_succeeded());
}
