use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use vaultsync::chain::{ChainExecutor, ChainOutcome, ProcessChain};
use vaultsync::exec::CommandSpec;
use vaultsync_test_utils::{RecordingNotifier, ScriptedRunner};

// Chain of `len` commands `step-0 .. step-(len-1)`; `failing` holds the
// indices that exit non-zero.
fn run_chain(len: usize, failing: &[usize]) -> (ChainOutcome, Vec<String>, usize) {
    let mut runner = ScriptedRunner::new();
    for &i in failing {
        let name = format!("step-{i}");
        runner = runner.fail_on(&[name.as_str()], 1);
    }
    let notifier = RecordingNotifier::new();
    let executor = ChainExecutor::new(
        runner.clone(),
        Arc::new(notifier.clone()),
        Duration::from_millis(1),
    );

    let chain = ProcessChain::new(
        (0..len)
            .map(|i| CommandSpec::new("tool", [format!("step-{i}")]))
            .collect(),
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let outcome = rt.block_on(executor.run(chain, Path::new("/vault")));

    let ran = runner.spawned().iter().map(|c| c.args[0].clone()).collect();
    (outcome, ran, notifier.terminal_notices().len())
}

proptest! {
    #[test]
    fn executor_runs_exactly_the_prefix_up_to_first_failure(
        len in 0usize..12,
        failing in proptest::collection::vec(0usize..12, 0..4),
    ) {
        let failing: Vec<usize> = failing.into_iter().filter(|&i| i < len).collect();
        let (outcome, ran, notices) = run_chain(len, &failing);

        let first_failure = failing.iter().copied().min();
        let expected_runs = match first_failure {
            Some(k) => k + 1,
            None => len,
        };

        let expected: Vec<String> = (0..expected_runs).map(|i| format!("step-{i}")).collect();
        prop_assert_eq!(&ran, &expected);
        prop_assert_eq!(notices, expected_runs);

        match first_failure {
            Some(k) => {
                let aborted_at_k = matches!(outcome, ChainOutcome::Aborted { step, .. } if step == k);
                prop_assert!(aborted_at_k);
            }
            None => prop_assert_eq!(outcome, ChainOutcome::Completed { steps: len }),
        }
    }
}
