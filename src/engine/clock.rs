// src/engine/clock.rs

use chrono::{DateTime, Utc};

/// Source of "now" for the runtime shell. The core itself only ever sees
/// timestamps passed in, so tests swap this for a manual clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
