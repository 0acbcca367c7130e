use core::num::NonZeroUsize;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec};

#[cfg(feature = "std")]
use crate::clock::SystemClock;
use crate::clock::{Clock, nanos};
use crate::inner::Inner;

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use movsum_stats::profile_scope;

/// Aggregate for one time bucket of the ring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Slot {
    sum: i64,
    count: u64,
}

impl Slot {
    fn clear(&mut self) {
        self.sum = 0;
        self.count = 0;
    }
}

/// An approximate sliding time window backed by a fixed ring of slots.
///
/// The window duration is divided into `slot_count` equal-width buckets.
/// Observations are aggregated into the bucket covering "now" rather than
/// stored individually, so memory stays constant regardless of ingest rate.
/// A running total holds the contents of every closed bucket still inside
/// the window, making [`get`](Self::get) O(1) and [`add`](Self::add)
/// O(`slot_count`) worst case per call.
///
/// The price is granularity: buckets rotate out whole, so the oldest bucket
/// may contain observations up to one bucket width
/// (`duration / slot_count`) older than an exact window would allow. More
/// slots mean less error and more per-rotation work.
///
/// Cloning returns a handle to the same window.
///
/// # Example
///
/// ```
/// use core::num::NonZeroUsize;
/// use core::time::Duration;
/// use movsum::{ManualClock, SlottedWindow};
///
/// let clock = ManualClock::new();
/// let window = SlottedWindow::with_clock(
///     Duration::from_secs(10),
///     NonZeroUsize::new(5).unwrap(),
///     clock.clone(),
/// );
/// window.add(10);
/// clock.advance(Duration::from_secs(4));
/// window.add(20);
/// // both observations are still within the ten second lookback
/// assert_eq!(window.get(), (30, 2));
///
/// // the slot holding the first observation rotates out
/// clock.advance(Duration::from_secs(8));
/// assert_eq!(window.get(), (20, 1));
/// ```
pub struct SlottedWindow<C: Clock> {
    inner: Inner<SlottedState<C>>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

struct SlottedState<C> {
    clock: C,
    /// Clock reading at construction; slot positions are measured from here.
    start: u64,
    /// Window span in nanoseconds.
    duration: u64,
    /// Ring of bucket aggregates; the slot for logical position `pos` is
    /// `slots[pos % slots.len()]`.
    slots: Box<[Slot]>,
    /// Highest logical slot position reached so far. Never decreases and is
    /// deliberately not reduced modulo the ring length.
    current: u64,
    /// Aggregate of every closed slot still inside the window.
    total: Slot,
}

impl<C: Clock> Clone for SlottedWindow<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            #[cfg(feature = "profiler")]
            stats: self.stats.clone(),
        }
    }
}

#[cfg(feature = "std")]
impl SlottedWindow<SystemClock> {
    /// Creates a window over the trailing `duration` with `slot_count`
    /// buckets, timed by the system's monotonic clock.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use core::num::NonZeroUsize;
    /// use core::time::Duration;
    /// use movsum::SlottedWindow;
    ///
    /// let window = SlottedWindow::new(Duration::from_secs(60), NonZeroUsize::new(6).unwrap());
    /// window.add(1);
    /// assert_eq!(window.get(), (1, 1));
    /// ```
    pub fn new(duration: Duration, slot_count: NonZeroUsize) -> Self {
        Self::with_clock(duration, slot_count, SystemClock::default())
    }
}

impl<C: Clock> SlottedWindow<C> {
    /// Creates a window over the trailing `duration` with `slot_count`
    /// buckets, timed by `clock`.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    pub fn with_clock(duration: Duration, slot_count: NonZeroUsize, clock: C) -> Self {
        assert!(!duration.is_zero(), "window duration must be non-zero");
        let start = clock.now();
        Self {
            inner: Inner::new(SlottedState {
                clock,
                start,
                duration: nanos(duration),
                slots: vec![Slot::default(); slot_count.get()].into_boxed_slice(),
                current: 0,
                total: Slot::default(),
            }),
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }

    /// Records one observation into the bucket covering "now".
    ///
    /// The sum is kept as an `i64`; callers pick value ranges such that one
    /// window's worth of observations cannot overflow it.
    #[inline]
    pub fn add(&self, value: i64) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.add);

        let mut guard = self.inner.lock();
        let state = &mut *guard;
        let idx = state.roll();
        let slot = &mut state.slots[idx];
        slot.sum += value;
        slot.count += 1;
    }

    /// Returns `(sum, count)` over the buckets still inside the window,
    /// including the currently open one.
    #[inline]
    pub fn get(&self) -> (i64, u64) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.get);

        let mut guard = self.inner.lock();
        let state = &mut *guard;
        let idx = state.roll();
        let open = state.slots[idx];
        (state.total.sum + open.sum, state.total.count + open.count)
    }

    /// The configured window span.
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.inner.lock().duration)
    }

    /// Number of buckets the window is divided into.
    pub fn slot_count(&self) -> NonZeroUsize {
        let state = self.inner.lock();
        NonZeroUsize::new(state.slots.len()).expect("ring is never empty")
    }

    /// Width of one bucket, rounded down to whole nanoseconds.
    pub fn slot_width(&self) -> Duration {
        let state = self.inner.lock();
        Duration::from_nanos(state.duration / state.slots.len() as u64)
    }

    /// Prints latency percentiles recorded for `add` and `get`.
    #[cfg(feature = "profiler")]
    pub fn print_stats(&self) {
        self.stats.print("SlottedWindow");
    }
}

impl<C: Clock> SlottedState<C> {
    /// Advances the ring to the bucket covering "now" and returns its
    /// physical index.
    ///
    /// The previously open slot is folded into `total` before any older slot
    /// is evicted, keeping `total` equal to "everything except the open
    /// slot". Slots between the old and new position are subtracted from
    /// `total` and cleared as they leave the window.
    #[inline]
    fn roll(&mut self) -> usize {
        let len = self.slots.len() as u64;
        let elapsed = self.clock.since(self.start);
        // Multiply before dividing: duration / len truncates.
        let new_pos = ((elapsed as u128 * len as u128) / self.duration as u128) as u64;
        if new_pos > self.current {
            if new_pos - self.current >= len {
                // More time passed than the ring can represent.
                for slot in self.slots.iter_mut() {
                    slot.clear();
                }
                self.total.clear();
            } else {
                let open = &mut self.slots[(self.current % len) as usize];
                self.total.sum += open.sum;
                self.total.count += open.count;
                for pos in self.current + 1..=new_pos {
                    let slot = &mut self.slots[(pos % len) as usize];
                    self.total.sum -= slot.sum;
                    self.total.count -= slot.count;
                    slot.clear();
                }
            }
            self.current = new_pos;
        }
        (self.current % len) as usize
    }
}
