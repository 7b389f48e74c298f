// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`SyncEvent`]s (each stamped with the time it was observed) and
//! produces:
//! - an updated core state
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for reading
//! events from channels, running chains and handling shutdown. The core has
//! no channels, no Tokio types and performs no IO, so every scheduling rule
//! can be tested by feeding it events and timestamps.

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use crate::chain::{ChainOutcome, ProcessChain};
use crate::config::SyncConfig;
use crate::types::ChainKind;

use super::gate::DebounceGate;
use super::lock::{ActiveChain, ExecutionLock};
use super::queue::ChainQueue;
use super::workflows::{publish_chain, reconcile_chain};
use super::{ChainId, ChainRequest, RuntimeOptions, SyncEvent};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Run this chain now; it holds the execution lock until it finishes.
    StartChain(ChainRequest),
    /// Request that the process exits (used for `--once` when idle).
    RequestExit,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn keep(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Pure core runtime state.
///
/// Owns the settings snapshot, the debounce gate, the execution lock and the
/// queue of chains waiting for it.
#[derive(Debug)]
pub struct CoreRuntime {
    config: SyncConfig,
    root: Option<PathBuf>,
    gate: DebounceGate,
    lock: ExecutionLock,
    queue: ChainQueue,
    options: RuntimeOptions,
    next_id: ChainId,
    reconcile_started: bool,
}

impl CoreRuntime {
    /// `root` is the result of the filesystem-root capability query; `None`
    /// puts the core in no-op mode. `load_time` is the session start.
    pub fn new(
        config: SyncConfig,
        root: Option<PathBuf>,
        load_time: DateTime<Utc>,
        options: RuntimeOptions,
    ) -> Self {
        let gate = DebounceGate::new(load_time, config.min_commit_delay());
        let queue = ChainQueue::new(config.busy_behaviour(), config.queue_length());
        Self {
            config,
            root,
            gate,
            lock: ExecutionLock::default(),
            queue,
            options,
            next_id: 1,
            reconcile_started: false,
        }
    }

    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// True when no chain holds the working directory.
    pub fn is_idle(&self) -> bool {
        !self.lock.is_held()
    }

    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn active_chain(&self) -> Option<ActiveChain> {
        self.lock.holder()
    }

    pub fn is_noop(&self) -> bool {
        self.root.is_none()
    }

    /// Startup Reconciliation: emitted exactly once per session, never gated.
    pub fn start(&mut self) -> CoreStep {
        if self.reconcile_started {
            debug!("startup reconciliation already issued; ignoring");
            return CoreStep::keep(Vec::new());
        }
        self.reconcile_started = true;

        let Some(root) = self.root.clone() else {
            warn!("no local filesystem root; running in no-op mode (no git commands will run)");
            return self.exit_if_idle(Vec::new());
        };

        let started_at = self.gate.load_time().with_timezone(&Local);
        let chain = reconcile_chain(&self.config, &started_at);
        info!(
            branch = self.config.branch(),
            remote = self.config.remote(),
            "starting startup reconciliation"
        );

        let commands = self.submit(ChainKind::Reconcile, chain, root);
        CoreStep::keep(commands)
    }

    /// Handle a single event observed at `now`.
    pub fn step(&mut self, event: SyncEvent, now: DateTime<Utc>) -> CoreStep {
        match event {
            SyncEvent::FileChanged { file_name } => self.handle_file_changed(file_name, now),
            SyncEvent::ChainFinished { id, outcome } => self.handle_chain_finished(id, outcome),
            SyncEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }

    fn handle_file_changed(&mut self, file_name: String, now: DateTime<Utc>) -> CoreStep {
        let Some(root) = self.root.clone() else {
            debug!(file = %file_name, "no filesystem root; ignoring change");
            return CoreStep::keep(Vec::new());
        };

        if !self.gate.should_submit(now) {
            debug!(
                file = %file_name,
                reopens_at = ?self.gate.reopens_at(),
                "publish suppressed by debounce gate"
            );
            return CoreStep::keep(Vec::new());
        }

        // The gate closes on submission, not on completion.
        self.gate.record_submission(now);
        let chain = publish_chain(&self.config, &file_name, now);
        info!(file = %file_name, "change passed debounce gate; submitting publish");

        let commands = self.submit(ChainKind::Publish, chain, root);
        CoreStep::keep(commands)
    }

    fn handle_chain_finished(&mut self, id: ChainId, outcome: ChainOutcome) -> CoreStep {
        match self.lock.release(id) {
            Some(active) => match &outcome {
                ChainOutcome::Completed { steps } => {
                    info!(id, kind = %active.kind, steps, "chain finished");
                }
                ChainOutcome::Aborted {
                    step,
                    command,
                    status,
                } => {
                    warn!(
                        id,
                        kind = %active.kind,
                        step,
                        command = %command,
                        status = %status,
                        "chain aborted"
                    );
                }
            },
            None => return CoreStep::keep(Vec::new()),
        }

        let mut commands = Vec::new();
        if let Some(next) = self.queue.pop_next() {
            debug!(id = next.id, kind = %next.kind, "starting queued chain");
            commands.extend(self.start_request(next));
        }

        self.exit_if_idle(commands)
    }

    /// Start `chain` if the lock is free, otherwise hand it to the queue.
    fn submit(&mut self, kind: ChainKind, chain: ProcessChain, cwd: PathBuf) -> Vec<CoreCommand> {
        let request = ChainRequest {
            id: self.next_id,
            kind,
            chain,
            cwd,
        };
        self.next_id += 1;

        if self.lock.is_held() {
            if let Some(dropped) = self.queue.record(request) {
                debug!(id = dropped.id, kind = %dropped.kind, "chain request discarded");
            }
            return Vec::new();
        }

        self.start_request(request).into_iter().collect()
    }

    fn start_request(&mut self, request: ChainRequest) -> Option<CoreCommand> {
        let acquired = self.lock.try_acquire(ActiveChain {
            id: request.id,
            kind: request.kind,
        });
        if !acquired {
            // Callers check the lock first; reaching this is a logic error.
            warn!(id = request.id, "execution lock unexpectedly held; queueing chain");
            self.queue.record(request);
            return None;
        }
        Some(CoreCommand::StartChain(request))
    }

    fn exit_if_idle(&self, mut commands: Vec<CoreCommand>) -> CoreStep {
        let idle = !self.lock.is_held() && self.queue.is_empty();
        if self.options.exit_when_idle && idle {
            commands.push(CoreCommand::RequestExit);
            return CoreStep {
                commands,
                keep_running: false,
            };
        }
        CoreStep::keep(commands)
    }
}
