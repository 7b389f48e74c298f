// src/config/loader.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::model::{RawSyncConfig, SyncConfig};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// File name of the settings file inside the synced root.
pub const SETTINGS_FILE_NAME: &str = ".vaultsync.toml";

/// Persistence for the flat settings snapshot.
///
/// The engine only ever reads a [`SyncConfig`] at chain-build time; writing
/// is left to whoever edits settings (the CLI's `--save-settings`).
pub trait SettingsStore: Send + Sync {
    /// Load settings merged with the documented defaults.
    fn load(&self) -> Result<SyncConfig>;

    /// Persist the given settings.
    fn save(&self, config: &SyncConfig) -> Result<()>;
}

/// TOML-backed settings store.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl TomlSettingsStore {
    /// Store backed by the real filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, Arc::new(RealFileSystem))
    }

    pub fn with_fs(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<SyncConfig> {
        if !self.fs.exists(&self.path) {
            debug!(path = ?self.path, "no settings file; using defaults");
            return Ok(SyncConfig::default());
        }
        let contents = self.fs.read_to_string(&self.path)?;
        parse_settings(&contents)
    }

    fn save(&self, config: &SyncConfig) -> Result<()> {
        let contents = toml::to_string_pretty(config.as_raw())?;
        self.fs.write(&self.path, contents.as_bytes())?;
        info!(path = ?self.path, "settings saved");
        Ok(())
    }
}

/// Parse and validate settings text.
///
/// Missing keys take their defaults (handled by `serde`), so an empty string
/// yields the default configuration.
pub fn parse_settings(contents: &str) -> Result<SyncConfig> {
    let raw: RawSyncConfig = toml::from_str(contents)?;
    SyncConfig::try_from(raw)
}

/// Default settings path for a synced root.
pub fn default_settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}
