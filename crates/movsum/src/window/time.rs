use core::time::Duration;

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(feature = "std")]
use crate::clock::SystemClock;
use crate::clock::{Clock, nanos};
use crate::inner::Inner;

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use movsum_stats::profile_scope;

/// A single observation stamped with the clock reading at insertion.
#[derive(Debug, Clone, Copy)]
struct TimedEntry {
    at: u64,
    value: i64,
}

/// An exact sliding time window over individually timestamped observations.
///
/// Every observation is stored with its insertion timestamp. Expiry runs
/// lazily at the start of both [`add`](Self::add) and [`get`](Self::get):
/// entries are dropped from the oldest end while their age has reached the
/// window duration, so an entry expires the moment it is exactly one
/// duration old. Each entry is examined at most once over its lifetime,
/// making both operations O(1) amortized.
///
/// Cloning returns a handle to the same window.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use movsum::{ManualClock, TimeWindow};
///
/// let clock = ManualClock::new();
/// let window = TimeWindow::with_clock(Duration::from_secs(10), clock.clone());
/// window.add(100);
/// clock.advance(Duration::from_secs(5));
/// window.add(50);
/// assert_eq!(window.get(), (150, 2));
///
/// // the first observation is now exactly ten seconds old and expires
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(window.get(), (50, 1));
/// ```
pub struct TimeWindow<C: Clock> {
    inner: Inner<TimeState<C>>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

struct TimeState<C> {
    clock: C,
    /// Window span in nanoseconds.
    duration: u64,
    /// Oldest entry at the front, newest at the back.
    queue: VecDeque<TimedEntry>,
    /// Running sum of everything in `queue`.
    sum: i64,
}

impl<C: Clock> Clone for TimeWindow<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            #[cfg(feature = "profiler")]
            stats: self.stats.clone(),
        }
    }
}

#[cfg(feature = "std")]
impl TimeWindow<SystemClock> {
    /// Creates a window over the trailing `duration`, timed by the system's
    /// monotonic clock.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use movsum::TimeWindow;
    ///
    /// let window = TimeWindow::new(Duration::from_millis(100));
    /// window.add(1);
    /// window.add(1);
    /// window.add(1);
    /// let (sum, _count) = window.get();
    /// // per-second rate over the lookback
    /// let rate = sum as f64 / Duration::from_millis(100).as_secs_f64();
    /// assert!((rate - 30.0).abs() < 1e-9);
    /// ```
    pub fn new(duration: Duration) -> Self {
        Self::with_clock(duration, SystemClock::default())
    }
}

impl<C: Clock> TimeWindow<C> {
    /// Creates a window over the trailing `duration`, timed by `clock`.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    pub fn with_clock(duration: Duration, clock: C) -> Self {
        assert!(!duration.is_zero(), "window duration must be non-zero");
        Self {
            inner: Inner::new(TimeState {
                clock,
                duration: nanos(duration),
                queue: VecDeque::new(),
                sum: 0,
            }),
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }

    /// Records one observation at the current clock reading, after expiring
    /// anything that has aged out.
    ///
    /// The sum is kept as an `i64`; callers pick value ranges such that one
    /// window's worth of observations cannot overflow it.
    #[inline]
    pub fn add(&self, value: i64) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.add);

        let mut guard = self.inner.lock();
        let state = &mut *guard;
        state.expire();
        let at = state.clock.now();
        state.queue.push_back(TimedEntry { at, value });
        state.sum += value;
    }

    /// Returns `(sum, count)` over the observations still inside the window.
    ///
    /// Expiry runs first, so the result reflects only entries younger than
    /// the window duration at the time of the call.
    #[inline]
    pub fn get(&self) -> (i64, u64) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.get);

        let mut guard = self.inner.lock();
        let state = &mut *guard;
        state.expire();
        (state.sum, state.queue.len() as u64)
    }

    /// The configured window span.
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.inner.lock().duration)
    }

    /// Prints latency percentiles recorded for `add` and `get`.
    #[cfg(feature = "profiler")]
    pub fn print_stats(&self) {
        self.stats.print("TimeWindow");
    }
}

impl<C: Clock> TimeState<C> {
    /// Drops entries whose age has reached the window duration.
    ///
    /// Entries are insertion-ordered, so the scan stops at the first entry
    /// still inside the window.
    fn expire(&mut self) {
        let now = self.clock.now();
        while let Some(oldest) = self.queue.front() {
            if now.saturating_sub(oldest.at) < self.duration {
                break;
            }
            self.sum -= oldest.value;
            self.queue.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn window(duration_ns: u64) -> (TimeWindow<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let window = TimeWindow::with_clock(Duration::from_nanos(duration_ns), clock.clone());
        (window, clock)
    }

    fn add_at(window: &TimeWindow<ManualClock>, clock: &ManualClock, value: i64, ns: u64) {
        clock.set(Duration::from_nanos(ns));
        window.add(value);
    }

    fn assert_at(
        window: &TimeWindow<ManualClock>,
        clock: &ManualClock,
        sum: i64,
        count: u64,
        ns: u64,
    ) {
        clock.set(Duration::from_nanos(ns));
        assert_eq!(window.get(), (sum, count));
    }

    #[test]
    fn expires_oldest_first() {
        let (ms, clock) = window(10);

        ms.add(10);
        assert_eq!(ms.get(), (10, 1));
        add_at(&ms, &clock, 10, 1);
        assert_at(&ms, &clock, 20, 2, 1);
        add_at(&ms, &clock, 10, 2);
        assert_at(&ms, &clock, 30, 3, 2);
        add_at(&ms, &clock, 10, 3);
        assert_at(&ms, &clock, 40, 4, 3);

        // at 10ns the first entry is exactly one duration old and is popped
        assert_at(&ms, &clock, 30, 3, 10);

        // skip an entire duration and add
        add_at(&ms, &clock, 100, 20);
        assert_at(&ms, &clock, 100, 1, 20);

        // skip an entire duration
        assert_at(&ms, &clock, 0, 0, 30);

        // repopulate
        add_at(&ms, &clock, 10, 31);
        add_at(&ms, &clock, 10, 33);
        add_at(&ms, &clock, 10, 35);
        assert_at(&ms, &clock, 30, 3, 39);
    }

    #[test]
    fn age_equal_to_duration_is_excluded() {
        let (ms, clock) = window(10);
        ms.add(7);
        clock.set(Duration::from_nanos(9));
        assert_eq!(ms.get(), (7, 1));
        clock.set(Duration::from_nanos(10));
        assert_eq!(ms.get(), (0, 0));
    }

    #[test]
    fn get_is_idempotent() {
        let (ms, clock) = window(10);
        ms.add(5);
        add_at(&ms, &clock, 5, 4);
        clock.set(Duration::from_nanos(12));
        assert_eq!(ms.get(), (5, 1));
        assert_eq!(ms.get(), (5, 1));
    }

    #[test]
    fn tolerates_clock_moving_backwards() {
        let (ms, clock) = window(10);
        add_at(&ms, &clock, 100, 1000);
        // a query with an older reading sees the entry as age zero
        assert_at(&ms, &clock, 100, 1, 100);
    }

    #[test]
    fn add_expires_before_stamping() {
        let (ms, clock) = window(10);
        ms.add(1);
        // the new entry must not resurrect the expired one
        add_at(&ms, &clock, 2, 15);
        assert_at(&ms, &clock, 2, 1, 15);
    }

    #[test]
    #[should_panic(expected = "window duration must be non-zero")]
    fn zero_duration_panics() {
        let _ = TimeWindow::with_clock(Duration::ZERO, ManualClock::new());
    }
}
