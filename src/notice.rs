// src/notice.rs

//! User-facing status surface.
//!
//! The engine posts short-lived status strings here and never waits for an
//! acknowledgement. How (and for how long) they are shown is the
//! implementation's business.

use std::time::Duration;

use tracing::info;

/// Fire-and-forget sink for status messages.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, duration: Duration);
}

/// Prints notices to stdout and mirrors them into the log.
///
/// A terminal has no notion of a notice expiring, so `duration` is only
/// recorded in the log line.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, message: &str, duration: Duration) {
        let message = message.trim_end();
        println!("[vaultsync] {message}");
        info!(display = ?duration, "notice: {message}");
    }
}
