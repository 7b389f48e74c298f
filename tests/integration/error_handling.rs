// tests/integration/error_handling.rs

use std::io::Write;
use tempfile::NamedTempFile;
use vaultsync::config::{parse_settings, SettingsStore, TomlSettingsStore};
use vaultsync::errors::SyncError;

#[test]
fn non_numeric_delay_is_a_parse_error() {
    let result = parse_settings(r#"min_commit_delay_seconds = "soon""#);
    match result {
        Err(SyncError::TomlError(_)) => {}
        other => panic!("Expected TomlError, got: {:?}", other),
    }
}

#[test]
fn negative_delay_is_a_parse_error() {
    assert!(matches!(
        parse_settings("min_commit_delay_seconds = -5"),
        Err(SyncError::TomlError(_))
    ));
}

#[test]
fn empty_branch_is_a_config_error() {
    match parse_settings(r#"branch = """#) {
        Err(SyncError::ConfigError(msg)) => assert!(msg.contains("branch")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn remote_with_whitespace_is_a_config_error() {
    match parse_settings(r#"remote = "my origin""#) {
        Err(SyncError::ConfigError(msg)) => assert!(msg.contains("whitespace")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn option_like_branch_is_a_config_error() {
    assert!(matches!(
        parse_settings(r#"branch = "--force""#),
        Err(SyncError::ConfigError(_))
    ));
}

#[test]
fn zero_queue_length_is_a_config_error() {
    match parse_settings("queue_length = 0") {
        Err(SyncError::ConfigError(msg)) => assert!(msg.contains("queue_length")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn zero_timeout_is_a_config_error() {
    assert!(matches!(
        parse_settings("command_timeout_seconds = 0"),
        Err(SyncError::ConfigError(_))
    ));
}

#[test]
fn bad_exclude_glob_is_a_config_error() {
    match parse_settings(r#"exclude = ["notes/[unclosed"]"#) {
        Err(SyncError::ConfigError(msg)) => assert!(msg.contains("exclude")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn unknown_busy_behaviour_is_rejected() {
    assert!(matches!(
        parse_settings(r#"busy_behaviour = "cancel""#),
        Err(SyncError::TomlError(_))
    ));
}

#[test]
fn broken_settings_file_surfaces_from_store() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "branch = [").unwrap();

    let store = TomlSettingsStore::new(file.path());
    assert!(matches!(store.load(), Err(SyncError::TomlError(_))));
}
