#![allow(dead_code)]

use vaultsync::config::{RawSyncConfig, SyncConfig};
use vaultsync::types::BusyBehaviour;

/// Builder for `SyncConfig` to simplify test setup.
pub struct SyncConfigBuilder {
    raw: RawSyncConfig,
}

impl SyncConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSyncConfig::default(),
        }
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.raw.branch = branch.to_string();
        self
    }

    pub fn remote(mut self, remote: &str) -> Self {
        self.raw.remote = remote.to_string();
        self
    }

    pub fn min_commit_delay_seconds(mut self, secs: u64) -> Self {
        self.raw.min_commit_delay_seconds = secs;
        self
    }

    pub fn notice_display_millis(mut self, millis: u64) -> Self {
        self.raw.notice_display_millis = millis;
        self
    }

    pub fn busy_behaviour(mut self, behaviour: BusyBehaviour) -> Self {
        self.raw.busy_behaviour = behaviour;
        self
    }

    pub fn queue_length(mut self, len: usize) -> Self {
        self.raw.queue_length = len;
        self
    }

    pub fn command_timeout_seconds(mut self, secs: u64) -> Self {
        self.raw.command_timeout_seconds = Some(secs);
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.raw.exclude.push(pattern.to_string());
        self
    }

    pub fn raw(self) -> RawSyncConfig {
        self.raw
    }

    pub fn build(self) -> SyncConfig {
        SyncConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for SyncConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
