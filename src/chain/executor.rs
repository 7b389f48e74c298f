// src/chain/executor.rs

//! Sequential, fail-fast chain draining.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::exec::{CommandEvent, CommandRunner, CommandSpec, ExitStatus};
use crate::notice::Notifier;

use super::process_chain::ProcessChain;

/// How a chain run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every command exited with code 0 (`steps == 0` for an empty chain).
    Completed { steps: usize },
    /// The command at zero-based `step` failed; later commands never ran.
    Aborted {
        step: usize,
        command: CommandSpec,
        status: ExitStatus,
    },
}

impl ChainOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ChainOutcome::Completed { .. })
    }
}

/// Drives a [`ProcessChain`] through a [`CommandRunner`], one command at a
/// time.
///
/// Command `n + 1` is only started after command `n` has reported a
/// successful exit. Every output chunk and every exit is posted to the
/// notifier. Separate `run` calls share nothing; serialising chains against
/// each other is the engine's job.
pub struct ChainExecutor<R: CommandRunner> {
    runner: R,
    notifier: Arc<dyn Notifier>,
    notice_duration: Duration,
}

impl<R: CommandRunner> std::fmt::Debug for ChainExecutor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainExecutor")
            .field("notice_duration", &self.notice_duration)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> ChainExecutor<R> {
    pub fn new(runner: R, notifier: Arc<dyn Notifier>, notice_duration: Duration) -> Self {
        Self {
            runner,
            notifier,
            notice_duration,
        }
    }

    /// Drain `chain` in `cwd` until it is empty or a command fails.
    pub async fn run(&self, mut chain: ProcessChain, cwd: &Path) -> ChainOutcome {
        let total = chain.len();
        let mut steps = 0;

        while let Some(command) = chain.next_command() {
            let command = command.clone();
            let step = steps;
            debug!(step, total, command = %command, "running chain step");

            let status = self.run_one(&command, cwd).await;
            self.notify(&format!("{} {}", command.label(), status));

            if !status.is_success() {
                warn!(
                    step,
                    total,
                    command = %command,
                    status = %status,
                    skipped = chain.remaining().len(),
                    "chain step failed; discarding the rest of the chain"
                );
                return ChainOutcome::Aborted {
                    step,
                    command,
                    status,
                };
            }
            steps += 1;
        }

        if total > 0 {
            info!(steps, "chain completed");
        }
        ChainOutcome::Completed { steps }
    }

    /// Run one command to its terminal event, forwarding output as it comes.
    async fn run_one(&self, command: &CommandSpec, cwd: &Path) -> ExitStatus {
        let mut handle = self.runner.spawn(command, cwd);

        while let Some(event) = handle.next_event().await {
            match event {
                CommandEvent::Stdout(chunk) => self.notify(&format!("stdout: {chunk}")),
                CommandEvent::Stderr(chunk) => self.notify(&format!("stderr: {chunk}")),
                CommandEvent::Exited(status) => return status,
            }
        }

        // `next_event` always yields an exit before `None`.
        ExitStatus::LaunchFailed("command produced no exit status".to_string())
    }

    fn notify(&self, message: &str) {
        self.notifier.show(message, self.notice_duration);
    }
}
