#![allow(dead_code)]

pub use vaultsync_test_utils::{at, init_tracing, t0, with_timeout};
pub use vaultsync_test_utils::{ManualClock, RecordingNotifier, ScriptedRunner, SyncConfigBuilder};
