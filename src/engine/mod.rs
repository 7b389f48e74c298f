// src/engine/mod.rs

//! Sync policy engine.
//!
//! This module ties together:
//! - the two workflows (Startup Reconciliation, Change-Triggered Publish)
//! - the debounce gate deciding when a publish may be submitted
//! - the execution lock + queue that keep chains from interleaving on the
//!   working directory
//! - the runtime event loop reacting to file changes, chain completions and
//!   shutdown
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;

use crate::chain::{ChainOutcome, ProcessChain};
use crate::types::ChainKind;

/// Identifier handed out to each submitted chain.
pub type ChainId = u64;

/// A chain ready to run, bound to the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRequest {
    pub id: ChainId,
    pub kind: ChainKind,
    pub chain: ProcessChain,
    pub cwd: PathBuf,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Exit once no chain is running and nothing is queued (used for
    /// `--once`).
    pub exit_when_idle: bool,
}

/// Events flowing into the runtime from the watcher, chain runs, etc.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A file under the root was modified, created, deleted, renamed or
    /// closed after writing.
    FileChanged { file_name: String },
    /// A chain run drained or aborted.
    ChainFinished { id: ChainId, outcome: ChainOutcome },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod clock;
pub mod core;
pub mod gate;
pub mod lock;
pub mod queue;
pub mod root;
pub mod runtime;
pub mod workflows;

pub use clock::{Clock, SystemClock};
pub use core::{CoreCommand, CoreRuntime, CoreStep};
pub use gate::DebounceGate;
pub use lock::{ActiveChain, ExecutionLock};
pub use queue::ChainQueue;
pub use root::discover_root;
pub use runtime::Runtime;
pub use crate::types::BusyBehaviour;
