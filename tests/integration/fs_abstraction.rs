// tests/integration/fs_abstraction.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use vaultsync::config::{parse_settings, SettingsStore, SyncConfig, TomlSettingsStore};
use vaultsync::engine::discover_root;
use vaultsync::fs::mock::MockFileSystem;
use vaultsync::types::BusyBehaviour;
use vaultsync_test_utils::SyncConfigBuilder;

#[test]
fn missing_settings_file_loads_defaults() {
    let fs = MockFileSystem::new();
    let store = TomlSettingsStore::with_fs("/vault/.vaultsync.toml", Arc::new(fs));

    let cfg = store.load().unwrap();

    assert_eq!(cfg.branch(), "main");
    assert_eq!(cfg.remote(), "origin");
    assert_eq!(cfg.min_commit_delay(), Duration::from_secs(20));
    assert_eq!(cfg.notice_duration(), Duration::from_millis(10_000));
    assert_eq!(cfg.busy_behaviour(), BusyBehaviour::Queue);
    assert_eq!(cfg.queue_length(), 1);
    assert_eq!(cfg.command_timeout(), None);
    assert!(cfg.exclude().is_empty());
}

#[test]
fn partial_settings_merge_with_defaults() {
    let fs = MockFileSystem::new();
    fs.add_file("/vault/.vaultsync.toml", "branch = \"notes\"\nminCommitDelaySeconds = 90\n");
    let store = TomlSettingsStore::with_fs("/vault/.vaultsync.toml", Arc::new(fs));

    let cfg = store.load().unwrap();

    assert_eq!(cfg.branch(), "notes");
    assert_eq!(cfg.remote(), "origin");
    assert_eq!(cfg.min_commit_delay(), Duration::from_secs(90));
}

#[test]
fn save_then_load_keeps_settings() {
    let fs = MockFileSystem::new();
    let store = TomlSettingsStore::with_fs("/vault/.vaultsync.toml", Arc::new(fs.clone()));

    let cfg = SyncConfigBuilder::new()
        .branch("notes")
        .remote("backup")
        .min_commit_delay_seconds(45)
        .busy_behaviour(BusyBehaviour::Drop)
        .command_timeout_seconds(120)
        .exclude(".obsidian/workspace*.json")
        .build();
    store.save(&cfg).unwrap();

    let written = String::from_utf8(fs.contents("/vault/.vaultsync.toml").unwrap()).unwrap();
    assert!(written.contains("branch = \"notes\""));
    assert!(written.contains("busy_behaviour = \"drop\""));

    assert_eq!(store.load().unwrap(), cfg);
}

#[test]
fn empty_settings_text_is_the_default_config() {
    assert_eq!(parse_settings("").unwrap(), SyncConfig::default());
}

#[test]
fn saving_on_disk_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join(".vaultsync.toml");
    let store = TomlSettingsStore::new(&path);

    store.save(&SyncConfig::default()).unwrap();

    assert!(path.exists());
    assert_eq!(store.load().unwrap(), SyncConfig::default());
}

#[test]
fn root_discovery_accepts_directories_only() {
    let fs = MockFileSystem::new();
    fs.add_dir("/vault");
    fs.add_file("/vault/note.md", "hello");

    assert_eq!(discover_root(&fs, Path::new("/vault")), Some(PathBuf::from("/vault")));
    assert_eq!(discover_root(&fs, Path::new("/vault/note.md")), None);
    assert_eq!(discover_root(&fs, Path::new("/nowhere")), None);
}

#[test]
fn root_discovery_on_real_fs_canonicalizes() {
    let dir = tempfile::tempdir().unwrap();
    let fs = vaultsync::fs::RealFileSystem;
    let found = discover_root(&fs, dir.path()).unwrap();
    assert_eq!(found, dir.path().canonicalize().unwrap());
}
