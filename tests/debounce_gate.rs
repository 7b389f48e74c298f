// tests/debounce_gate.rs

mod common;
use crate::common::{at, t0};

use std::time::Duration;

use chrono::TimeDelta;
use vaultsync::engine::DebounceGate;

#[test]
fn gate_starts_with_both_timestamps_at_load_time() {
    let gate = DebounceGate::new(t0(), Duration::from_secs(20));
    assert_eq!(gate.load_time(), t0());
    assert_eq!(gate.last_push_time(), t0());
}

#[test]
fn threshold_is_exclusive() {
    let gate = DebounceGate::new(t0(), Duration::from_secs(20));
    assert!(!gate.should_submit(at(20)));
    assert!(gate.should_submit(t0() + TimeDelta::milliseconds(20_001)));
}

#[test]
fn zero_delay_still_needs_time_to_pass() {
    let gate = DebounceGate::new(t0(), Duration::ZERO);
    assert!(!gate.should_submit(t0()));
    assert!(gate.should_submit(t0() + TimeDelta::milliseconds(1)));
}

#[test]
fn timeline_from_the_twenty_second_scenario() {
    let mut gate = DebounceGate::new(t0(), Duration::from_secs(20));

    // Inside the startup window.
    assert!(!gate.should_submit(at(5)));

    assert!(gate.should_submit(at(25)));
    gate.record_submission(at(25));
    assert_eq!(gate.last_push_time(), at(25));

    // Only 5s since the last push.
    assert!(!gate.should_submit(at(30)));

    assert!(gate.should_submit(at(50)));
}

#[test]
fn reopens_at_tracks_latest_timestamp() {
    let mut gate = DebounceGate::new(t0(), Duration::from_secs(20));
    assert_eq!(gate.reopens_at(), Some(at(20)));
    gate.record_submission(at(25));
    assert_eq!(gate.reopens_at(), Some(at(45)));
}

#[test]
fn huge_delay_never_opens() {
    let gate = DebounceGate::new(t0(), Duration::from_secs(u64::MAX));
    assert!(!gate.should_submit(at(10 * 365 * 24 * 3600)));
}
