// src/config/mod.rs

//! Settings model, validation and persistence.
//!
//! The rest of the crate only sees the validated [`SyncConfig`]; the raw
//! serde form exists for the settings store and for tests.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_settings_path, parse_settings, SettingsStore, TomlSettingsStore, SETTINGS_FILE_NAME,
};
pub use model::{RawSyncConfig, SyncConfig};
