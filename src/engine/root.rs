// src/engine/root.rs

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::fs::FileSystem;

/// Capability query: does this environment expose a local filesystem root
/// that git commands can run in?
///
/// Returns the canonical directory for `candidate`, or `None` if there is no
/// usable directory there. With `None` the engine runs in no-op mode and
/// never builds a chain.
pub fn discover_root(fs: &dyn FileSystem, candidate: &Path) -> Option<PathBuf> {
    let root = match fs.canonicalize(candidate) {
        Ok(root) => root,
        Err(err) => {
            warn!(path = ?candidate, error = %err, "sync root is not accessible");
            return None;
        }
    };

    if !fs.is_dir(&root) {
        warn!(path = ?root, "sync root is not a directory");
        return None;
    }

    Some(root)
}
