// src/engine/lock.rs

use tracing::warn;

use crate::types::ChainKind;

use super::ChainId;

/// The chain currently allowed to mutate the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChain {
    pub id: ChainId,
    pub kind: ChainKind,
}

/// Single-owner execution lock over the working directory.
///
/// At most one chain holds it; everything else waits in the queue.
#[derive(Debug, Default)]
pub struct ExecutionLock {
    active: Option<ActiveChain>,
}

impl ExecutionLock {
    pub fn is_held(&self) -> bool {
        self.active.is_some()
    }

    pub fn holder(&self) -> Option<ActiveChain> {
        self.active
    }

    /// Take the lock for `chain`; fails if another chain holds it.
    pub fn try_acquire(&mut self, chain: ActiveChain) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(chain);
        true
    }

    /// Release the lock if `id` holds it. Stale or unknown ids are ignored.
    pub fn release(&mut self, id: ChainId) -> Option<ActiveChain> {
        match self.active {
            Some(active) if active.id == id => self.active.take(),
            other => {
                warn!(id, holder = ?other, "finish reported for a chain that does not hold the lock");
                None
            }
        }
    }
}
