// src/config/validate.rs

use globset::Glob;

use crate::config::model::{RawSyncConfig, SyncConfig};
use crate::errors::{Result, SyncError};

impl TryFrom<RawSyncConfig> for SyncConfig {
    type Error = SyncError;

    fn try_from(raw: RawSyncConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(SyncConfig::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawSyncConfig) -> Result<()> {
    validate_ref_name("branch", &cfg.branch)?;
    validate_ref_name("remote", &cfg.remote)?;
    validate_queue(cfg)?;
    validate_exclude(cfg)?;
    Ok(())
}

/// Branch and remote names end up as separate argv entries, so anything
/// git would reject (or split on) is refused here.
fn validate_ref_name(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::ConfigError(format!("`{key}` must not be empty")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(SyncError::ConfigError(format!(
            "`{key}` must not contain whitespace (got {value:?})"
        )));
    }
    if value.starts_with('-') {
        return Err(SyncError::ConfigError(format!(
            "`{key}` must not start with '-' (got {value:?})"
        )));
    }
    Ok(())
}

fn validate_queue(cfg: &RawSyncConfig) -> Result<()> {
    if cfg.queue_length == 0 {
        return Err(SyncError::ConfigError(
            "`queue_length` must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.command_timeout_seconds == Some(0) {
        return Err(SyncError::ConfigError(
            "`command_timeout_seconds` must be >= 1 when set".to_string(),
        ));
    }
    Ok(())
}

fn validate_exclude(cfg: &RawSyncConfig) -> Result<()> {
    for pattern in &cfg.exclude {
        Glob::new(pattern).map_err(|e| {
            SyncError::ConfigError(format!("invalid exclude pattern {pattern:?}: {e}"))
        })?;
    }
    Ok(())
}
