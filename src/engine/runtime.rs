// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::chain::ChainExecutor;
use crate::errors::Result;
use crate::exec::CommandRunner;

use super::clock::Clock;
use super::core::{CoreRuntime, CoreStep};
use super::{ChainRequest, CoreCommand, SyncEvent};

/// How long shutdown waits for an in-flight chain before giving up on it.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Drives the core in response to `SyncEvent`s and runs the chains it asks
/// for on a [`ChainExecutor`].
///
/// This is a pure IO shell around `CoreRuntime`, which holds all the sync
/// semantics: it stamps events with the clock, spawns chain runs and feeds
/// their outcomes back in as `ChainFinished`.
pub struct Runtime<R: CommandRunner + 'static> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<SyncEvent>,
    event_tx: mpsc::Sender<SyncEvent>,
    executor: Arc<ChainExecutor<R>>,
    clock: Arc<dyn Clock>,
    in_flight: JoinSet<()>,
}

impl<R: CommandRunner + 'static> fmt::Debug for Runtime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner + 'static> Runtime<R> {
    /// `event_tx` must feed `event_rx`; chain completions are reported on it.
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<SyncEvent>,
        event_tx: mpsc::Sender<SyncEvent>,
        executor: ChainExecutor<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx,
            executor: Arc::new(executor),
            clock,
            in_flight: JoinSet::new(),
        }
    }

    /// Main event loop.
    ///
    /// - Issues the Startup Reconciliation.
    /// - Consumes `SyncEvent`s, feeds them into the core with the current
    ///   time, and executes the commands it returns.
    pub async fn run(mut self) -> Result<()> {
        info!("vaultsync runtime started");

        let step = self.core.start();
        let mut keep_running = self.apply(step);

        while keep_running {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let now = self.clock.now();
            let step = self.core.step(event, now);
            keep_running = self.apply(step);
        }

        self.drain_in_flight().await;
        info!("runtime exiting");
        Ok(())
    }

    /// Execute the commands of one core step; returns `keep_running`.
    fn apply(&mut self, step: CoreStep) -> bool {
        for command in step.commands {
            match command {
                CoreCommand::StartChain(request) => self.spawn_chain(request),
                CoreCommand::RequestExit => info!("core requested exit; stopping runtime"),
            }
        }
        step.keep_running
    }

    fn spawn_chain(&mut self, request: ChainRequest) {
        let ChainRequest {
            id,
            kind,
            chain,
            cwd,
        } = request;
        debug!(id, %kind, steps = chain.len(), cwd = ?cwd, "spawning chain");

        let executor = Arc::clone(&self.executor);
        let tx = self.event_tx.clone();

        self.in_flight.spawn(async move {
            let outcome = executor.run(chain, &cwd).await;
            if tx
                .send(SyncEvent::ChainFinished { id, outcome })
                .await
                .is_err()
            {
                debug!(id, "runtime gone before chain outcome could be reported");
            }
        });

        // Reap finished runs so the set does not grow without bound.
        while let Some(joined) = self.in_flight.try_join_next() {
            if let Err(e) = joined {
                warn!(error = %e, "chain task failed");
            }
        }
    }

    /// Let a running chain finish rather than killing git halfway through.
    async fn drain_in_flight(&mut self) {
        if self.in_flight.is_empty() {
            return;
        }
        info!(
            running = self.in_flight.len(),
            grace_secs = SHUTDOWN_GRACE.as_secs(),
            "waiting for running chain before exit"
        );
        let wait = async {
            while let Some(joined) = self.in_flight.join_next().await {
                if let Err(e) = joined {
                    warn!(error = %e, "chain task failed");
                }
            }
        };
        if tokio::time::timeout(SHUTDOWN_GRACE, wait).await.is_err() {
            warn!("running chain did not finish in time; abandoning it");
        }
    }
}
