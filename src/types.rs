use serde::{Deserialize, Serialize};

/// Behaviour when a new chain request arrives while another chain holds the
/// working directory.
///
/// - `Queue`: remember the request and start it once the running chain
///   finishes (default behaviour).
/// - `Drop`: discard the request; the running chain is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyBehaviour {
    #[default]
    Queue,
    Drop,
}

/// Which workflow a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    /// Startup Reconciliation: stash, checkout, backup, fetch, reset, pop.
    Reconcile,
    /// Change-Triggered Publish: add, commit, push.
    Publish,
}

impl std::fmt::Display for ChainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainKind::Reconcile => f.write_str("reconcile"),
            ChainKind::Publish => f.write_str("publish"),
        }
    }
}
