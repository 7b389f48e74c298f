use std::time::Duration;

use chrono::TimeDelta;
use proptest::prelude::*;
use vaultsync::engine::DebounceGate;
use vaultsync_test_utils::t0;

proptest! {
    #[test]
    fn nothing_passes_inside_the_startup_window(
        delay in 0u64..3600,
        offset_ms in 0i64..3_600_000,
    ) {
        let gate = DebounceGate::new(t0(), Duration::from_secs(delay));
        let offset_ms = offset_ms % (delay as i64 * 1000 + 1);
        prop_assert!(!gate.should_submit(t0() + TimeDelta::milliseconds(offset_ms)));
    }

    #[test]
    fn nothing_passes_within_delay_of_a_submission(
        delay in 1u64..3600,
        submitted_after in 0i64..100_000,
        offset_ms in 0i64..3_600_000,
    ) {
        let mut gate = DebounceGate::new(t0(), Duration::from_secs(delay));
        let submitted_at = t0() + TimeDelta::seconds(delay as i64 + 1 + submitted_after);
        prop_assert!(gate.should_submit(submitted_at));
        gate.record_submission(submitted_at);

        let offset_ms = offset_ms % (delay as i64 * 1000 + 1);
        prop_assert!(!gate.should_submit(submitted_at + TimeDelta::milliseconds(offset_ms)));
        prop_assert!(gate.should_submit(submitted_at + TimeDelta::milliseconds(delay as i64 * 1000 + 1)));
    }
}
