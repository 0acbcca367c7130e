//! Model-based properties for the three window types, driven by a
//! deterministic clock.

use core::num::NonZeroUsize;
use core::time::Duration;

use movsum::{CountWindow, ManualClock, SlottedWindow, TimeWindow};
use proptest::prelude::*;

proptest! {
    #[test]
    fn count_window_matches_model(
        capacity in 1usize..32,
        values in proptest::collection::vec(-1000i64..1000, 0..200),
    ) {
        let window = CountWindow::new(NonZeroUsize::new(capacity).unwrap());
        let mut model: Vec<i64> = Vec::new();
        for &value in &values {
            window.add(value);
            model.push(value);
            if model.len() > capacity {
                model.remove(0);
            }
            let expected_sum: i64 = model.iter().sum();
            prop_assert_eq!(window.get(), (expected_sum, model.len() as u64));
        }
    }

    #[test]
    fn time_window_matches_model(
        steps in proptest::collection::vec((0u64..50, -1000i64..1000), 0..200),
    ) {
        const DURATION: u64 = 100;
        let clock = ManualClock::new();
        let window = TimeWindow::with_clock(Duration::from_nanos(DURATION), clock.clone());
        let mut now = 0u64;
        let mut entries: Vec<(u64, i64)> = Vec::new();
        for &(advance, value) in &steps {
            now += advance;
            clock.set(Duration::from_nanos(now));
            window.add(value);
            entries.push((now, value));

            // an entry is live while its age is strictly below the duration
            let live: Vec<i64> = entries
                .iter()
                .filter(|(at, _)| now - at < DURATION)
                .map(|&(_, value)| value)
                .collect();
            let expected_sum: i64 = live.iter().sum();
            prop_assert_eq!(window.get(), (expected_sum, live.len() as u64));
            // an immediate second call observes the same state
            prop_assert_eq!(window.get(), (expected_sum, live.len() as u64));
        }
    }

    #[test]
    fn slotted_window_matches_bucket_model(
        slot_count in 1usize..8,
        steps in proptest::collection::vec((0u64..40, -1000i64..1000), 1..200),
    ) {
        const DURATION: u64 = 100;
        let clock = ManualClock::new();
        let window = SlottedWindow::with_clock(
            Duration::from_nanos(DURATION),
            NonZeroUsize::new(slot_count).unwrap(),
            clock.clone(),
        );
        let len = slot_count as u64;
        let mut now = 0u64;
        let mut adds: Vec<(u64, i64)> = Vec::new();
        for &(advance, value) in &steps {
            now += advance;
            clock.set(Duration::from_nanos(now));
            window.add(value);
            adds.push((now * len / DURATION, value));

            // the window covers the trailing `slot_count` buckets, open one
            // included; everything older has rotated out wholesale
            let current = now * len / DURATION;
            let live: Vec<i64> = adds
                .iter()
                .filter(|(pos, _)| pos + len > current)
                .map(|&(_, value)| value)
                .collect();
            let expected_sum: i64 = live.iter().sum();
            prop_assert_eq!(window.get(), (expected_sum, live.len() as u64));
            // an immediate second call observes the same state
            prop_assert_eq!(window.get(), (expected_sum, live.len() as u64));
        }
    }
}
