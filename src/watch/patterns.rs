// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Directory whose contents never count as a local change: git rewrites it
/// during every chain.
pub const GIT_DIR: &str = ".git";

/// Decides which changed paths are publish candidates.
///
/// Paths are relative to the sync root with forward slashes (e.g.
/// `"notes/today.md"`). Anything inside `.git/` is always ignored; extra
/// `exclude` globs come from settings.
#[derive(Clone)]
pub struct ChangeFilter {
    exclude: GlobSet,
    patterns: Vec<String>,
}

impl fmt::Debug for ChangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeFilter")
            .field("exclude", &self.patterns)
            .finish()
    }
}

impl ChangeFilter {
    pub fn new(exclude: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid exclude pattern {pattern:?}"))?;
            builder.add(glob);
        }
        let exclude_set = builder.build().context("building exclude glob set")?;

        Ok(Self {
            exclude: exclude_set,
            patterns: exclude.to_vec(),
        })
    }

    /// True if a change at `rel_path` should trigger a publish.
    pub fn matches(&self, rel_path: &str) -> bool {
        if rel_path.is_empty() {
            return false;
        }
        if is_inside_git_dir(rel_path) {
            return false;
        }
        !self.exclude.is_match(rel_path)
    }
}

fn is_inside_git_dir(rel_path: &str) -> bool {
    rel_path.split('/').any(|component| component == GIT_DIR)
}
