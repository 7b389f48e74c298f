// src/engine/workflows.rs

//! The two git workflows, as process chains.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::chain::ProcessChain;
use crate::config::SyncConfig;
use crate::exec::CommandSpec;

/// Prefix of the safety branch created before the hard reset.
pub const BACKUP_BRANCH_PREFIX: &str = "localbackup";

/// Name of the backup branch for `branch` at `started_at`:
/// `localbackup/<branch>@<dd>-<mm>-<yyyy>-<HH>-<MM>-<SS>`.
pub fn backup_branch_name<Tz>(branch: &str, started_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "{BACKUP_BRANCH_PREFIX}/{branch}@{}",
        started_at.format("%d-%m-%Y-%H-%M-%S")
    )
}

/// Commit message for a publish: `<file>@<Www, DD Mon YYYY HH:MM:SS UTC>`.
pub fn commit_message(file_name: &str, now: DateTime<Utc>) -> String {
    format!("{file_name}@{}", now.format("%a, %d %b %Y %H:%M:%S UTC"))
}

/// Startup Reconciliation.
///
/// Local edits are stashed and a backup branch is cut before the working
/// tree is hard-reset to `<remote>/<branch>`; the stash is popped last. If
/// any step fails the rest is skipped, so e.g. a failed fetch leaves the
/// stash in place.
pub fn reconcile_chain<Tz>(config: &SyncConfig, started_at: &DateTime<Tz>) -> ProcessChain
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let branch = config.branch();
    let remote = config.remote();

    ProcessChain::new(vec![
        CommandSpec::git(["stash"]),
        CommandSpec::git(["checkout", branch]),
        CommandSpec::git(["branch".to_string(), backup_branch_name(branch, started_at)]),
        CommandSpec::git(["fetch", remote, branch]),
        CommandSpec::git(["reset".to_string(), "--hard".to_string(), format!("{remote}/{branch}")]),
        CommandSpec::git(["stash", "pop"]),
    ])
}

/// Change-Triggered Publish: stage everything, commit, push.
pub fn publish_chain(config: &SyncConfig, file_name: &str, now: DateTime<Utc>) -> ProcessChain {
    ProcessChain::new(vec![
        CommandSpec::git(["add", "."]),
        CommandSpec::git(["commit".to_string(), "-m".to_string(), commit_message(file_name, now)]),
        CommandSpec::git(["push", config.remote(), config.branch()]),
    ])
}
