// src/watch/event_handler.rs

//! Turning raw `notify` events into change-feed events.

use std::path::Path;

use notify::event::{AccessKind, AccessMode};
use notify::{Event, EventKind};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::SyncEvent;
use crate::watch::path_utils::{file_name_of, relative_str};
use crate::watch::patterns::ChangeFilter;

/// Whether an event kind counts as a local change: create, modify
/// (including renames), remove, or a file closed after writing.
pub fn is_change_kind(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => true,
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => true,
        _ => false,
    }
}

/// Forward every relevant path of `event` to the runtime as
/// `SyncEvent::FileChanged`.
///
/// Returns `false` once the runtime channel is closed.
pub async fn process_event(
    root: &Path,
    event: Event,
    filter: &ChangeFilter,
    runtime_tx: &mpsc::Sender<SyncEvent>,
) -> bool {
    if !is_change_kind(&event.kind) {
        return true;
    }

    for path in &event.paths {
        let Some(rel) = relative_str(root, path) else {
            warn!("could not relativize path {:?} against root {:?}", path, root);
            continue;
        };

        if !filter.matches(&rel) {
            debug!(rel = %rel, "change ignored by filter");
            continue;
        }

        let Some(file_name) = file_name_of(path) else {
            continue;
        };

        debug!(rel = %rel, kind = ?event.kind, "local change");
        if let Err(err) = runtime_tx.send(SyncEvent::FileChanged { file_name }).await {
            warn!("failed to send SyncEvent::FileChanged: {err}");
            return false;
        }
    }

    true
}
