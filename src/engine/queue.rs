// src/engine/queue.rs

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::types::BusyBehaviour;

use super::ChainRequest;

/// Chain requests waiting for the working directory to become free.
///
/// Semantics:
/// - `Queue`: requests are kept in arrival order. At most `max_len` are
///   kept; when a new one would exceed that, the oldest pending request is
///   discarded.
/// - `Drop`: nothing is ever kept; a request that finds the working
///   directory busy is discarded.
#[derive(Debug)]
pub struct ChainQueue {
    behaviour: BusyBehaviour,
    max_len: usize,
    pending: VecDeque<ChainRequest>,
}

impl ChainQueue {
    /// `max_len` is clamped to at least 1.
    pub fn new(behaviour: BusyBehaviour, max_len: usize) -> Self {
        Self {
            behaviour,
            max_len: max_len.max(1),
            pending: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Record a request that arrived while another chain is running.
    ///
    /// Returns the request that was discarded, if any.
    pub fn record(&mut self, request: ChainRequest) -> Option<ChainRequest> {
        match self.behaviour {
            BusyBehaviour::Queue => {
                debug!(id = request.id, kind = %request.kind, "queued chain behind running chain");
                self.pending.push_back(request);

                if self.pending.len() > self.max_len {
                    let dropped = self.pending.pop_front();
                    if let Some(ref old) = dropped {
                        warn!(
                            id = old.id,
                            kind = %old.kind,
                            max_len = self.max_len,
                            "chain queue full; dropping oldest pending chain"
                        );
                    }
                    return dropped;
                }
                None
            }
            BusyBehaviour::Drop => {
                debug!(id = request.id, kind = %request.kind, "working directory busy; dropping chain (drop mode)");
                Some(request)
            }
        }
    }

    /// Next request to run, in arrival order.
    pub fn pop_next(&mut self) -> Option<ChainRequest> {
        self.pending.pop_front()
    }
}
