// src/config/model.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::BusyBehaviour;

/// Settings as read from `.vaultsync.toml`.
///
/// A flat key-value file; every key is optional and falls back to the
/// documented default:
///
/// ```toml
/// branch = "main"
/// remote = "origin"
/// min_commit_delay_seconds = 20
/// notice_display_millis = 10000
/// busy_behaviour = "queue"
/// queue_length = 1
/// # command_timeout_seconds = 120
/// exclude = [".obsidian/workspace*.json"]
/// ```
///
/// camelCase spellings (`minCommitDelaySeconds`, ...) are accepted as aliases.
///
/// This is the *unvalidated* form; convert into [`SyncConfig`] with
/// `SyncConfig::try_from(raw)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawSyncConfig {
    /// Branch that is checked out, backed up and pushed.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Remote fetched from and pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Debounce threshold for publishing, in seconds.
    #[serde(default = "default_min_commit_delay_seconds", alias = "minCommitDelaySeconds")]
    pub min_commit_delay_seconds: u64,

    /// How long status notices stay visible, in milliseconds.
    #[serde(default = "default_notice_display_millis", alias = "noticeDisplayMillis")]
    pub notice_display_millis: u64,

    /// What to do with a chain request while another chain is running.
    #[serde(default, alias = "busyBehaviour")]
    pub busy_behaviour: BusyBehaviour,

    /// Maximum number of pending chains kept in `queue` mode.
    #[serde(default = "default_queue_length", alias = "queueLength")]
    pub queue_length: usize,

    /// Optional upper bound for a single git command. `None` waits forever.
    #[serde(
        default,
        alias = "commandTimeoutSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub command_timeout_seconds: Option<u64>,

    /// Extra globs (relative to the root) whose changes never trigger a publish.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_min_commit_delay_seconds() -> u64 {
    20
}

fn default_notice_display_millis() -> u64 {
    10_000
}

fn default_queue_length() -> usize {
    1
}

impl Default for RawSyncConfig {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            remote: default_remote(),
            min_commit_delay_seconds: default_min_commit_delay_seconds(),
            notice_display_millis: default_notice_display_millis(),
            busy_behaviour: BusyBehaviour::default(),
            queue_length: default_queue_length(),
            command_timeout_seconds: None,
            exclude: Vec::new(),
        }
    }
}

/// Validated settings snapshot.
///
/// Chains are built from an immutable `SyncConfig`; only the settings store
/// produces new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    raw: RawSyncConfig,
}

impl SyncConfig {
    /// Construct without validation. Only `validate.rs` should call this.
    pub(crate) fn new_unchecked(raw: RawSyncConfig) -> Self {
        Self { raw }
    }

    pub fn branch(&self) -> &str {
        &self.raw.branch
    }

    pub fn remote(&self) -> &str {
        &self.raw.remote
    }

    pub fn min_commit_delay(&self) -> Duration {
        Duration::from_secs(self.raw.min_commit_delay_seconds)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.raw.notice_display_millis)
    }

    pub fn busy_behaviour(&self) -> BusyBehaviour {
        self.raw.busy_behaviour
    }

    pub fn queue_length(&self) -> usize {
        self.raw.queue_length
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.raw.command_timeout_seconds.map(Duration::from_secs)
    }

    pub fn exclude(&self) -> &[String] {
        &self.raw.exclude
    }

    /// Borrow the raw form (used when persisting).
    pub fn as_raw(&self) -> &RawSyncConfig {
        &self.raw
    }

    /// Take the raw form back out, e.g. to apply overrides and re-validate.
    pub fn into_raw(self) -> RawSyncConfig {
        self.raw
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new_unchecked(RawSyncConfig::default())
    }
}
