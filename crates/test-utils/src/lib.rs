pub mod builders;
pub mod fake_runner;

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing_subscriber::{fmt, EnvFilter};
use vaultsync::engine::Clock;
use vaultsync::notice::Notifier;

pub use builders::SyncConfigBuilder;
pub use fake_runner::ScriptedRunner;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Fixed session start used across tests.
pub fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).expect("valid timestamp")
}

/// `t0() + secs`.
pub fn at(secs: i64) -> DateTime<Utc> {
    t0() + TimeDelta::seconds(secs)
}

/// Notifier that keeps every message.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<(String, Duration)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.messages.lock().unwrap().iter().map(|(_, d)| *d).collect()
    }

    /// Only the per-command exit notices (no output chunks).
    pub fn terminal_notices(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|m| !m.starts_with("stdout: ") && !m.starts_with("stderr: "))
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, duration: Duration) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), duration));
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += TimeDelta::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
