// src/engine/gate.rs

//! Debounce gate for Change-Triggered Publish.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Two timestamps and a threshold.
///
/// A publish may be submitted only when more than `min_delay` has passed
/// since both the engine started and the last submission. The gate is
/// closed again as soon as a submission is recorded, whether or not the
/// submitted chain has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceGate {
    load_time: DateTime<Utc>,
    last_push_time: DateTime<Utc>,
    min_delay: TimeDelta,
}

impl DebounceGate {
    /// Both timestamps start at `load_time`.
    pub fn new(load_time: DateTime<Utc>, min_delay: Duration) -> Self {
        Self {
            load_time,
            last_push_time: load_time,
            min_delay: TimeDelta::from_std(min_delay).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn load_time(&self) -> DateTime<Utc> {
        self.load_time
    }

    pub fn last_push_time(&self) -> DateTime<Utc> {
        self.last_push_time
    }

    /// Pure query: would a trigger at `now` be submitted?
    pub fn should_submit(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.load_time) > self.min_delay
            && now.signed_duration_since(self.last_push_time) > self.min_delay
    }

    /// Close the gate: a publish was submitted at `now`.
    pub fn record_submission(&mut self, now: DateTime<Utc>) {
        self.last_push_time = now;
    }

    /// Instant after which the gate is open again (`None` if out of range).
    pub fn reopens_at(&self) -> Option<DateTime<Utc>> {
        self.load_time
            .max(self.last_push_time)
            .checked_add_signed(self.min_delay)
    }
}

