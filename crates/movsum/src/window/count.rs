use core::num::NonZeroUsize;

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

use crate::inner::Inner;

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use movsum_stats::profile_scope;

/// A sliding window over the last `capacity` observations.
///
/// Once full, every [`add`](Self::add) evicts the single oldest observation
/// before appending the new one, so the running sum and count always cover
/// exactly the most recent `capacity` values. Both operations are O(1).
///
/// Cloning returns a handle to the same window.
///
/// # Example
///
/// ```
/// use core::num::NonZeroUsize;
/// use movsum::CountWindow;
///
/// let window = CountWindow::new(NonZeroUsize::new(3).unwrap());
/// window.add(1);
/// window.add(2);
/// window.add(3);
/// assert_eq!(window.get(), (6, 3));
/// // a fourth observation pushes out the first
/// window.add(4);
/// assert_eq!(window.get(), (9, 3));
/// ```
#[derive(Clone)]
pub struct CountWindow {
    inner: Inner<CountState>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

struct CountState {
    /// Oldest value at the front, newest at the back.
    queue: VecDeque<i64>,
    /// Running sum of everything in `queue`.
    sum: i64,
    capacity: NonZeroUsize,
}

impl CountWindow {
    /// Creates a window keeping the last `capacity` observations.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Inner::new(CountState {
                queue: VecDeque::with_capacity(capacity.get()),
                sum: 0,
                capacity,
            }),
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }

    /// Records one observation, evicting the oldest if the window is full.
    ///
    /// The sum is kept as an `i64`; callers pick value ranges such that the
    /// sum of `capacity` values cannot overflow it.
    #[inline]
    pub fn add(&self, value: i64) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.add);

        let mut state = self.inner.lock();
        if state.queue.len() == state.capacity.get()
            && let Some(oldest) = state.queue.pop_front()
        {
            state.sum -= oldest;
        }
        state.queue.push_back(value);
        state.sum += value;
    }

    /// Returns the running `(sum, count)` over the window.
    ///
    /// # Example
    ///
    /// Deriving a moving average:
    ///
    /// ```
    /// use core::num::NonZeroUsize;
    /// use movsum::CountWindow;
    ///
    /// let window = CountWindow::new(NonZeroUsize::new(10).unwrap());
    /// window.add(1);
    /// window.add(1);
    /// window.add(1);
    /// let (sum, count) = window.get();
    /// let avg = sum as f64 / count as f64;
    /// assert_eq!(avg, 1.0);
    /// ```
    #[inline]
    pub fn get(&self) -> (i64, u64) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.get);

        let state = self.inner.lock();
        (state.sum, state.queue.len() as u64)
    }

    /// Maximum number of observations kept.
    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.lock().capacity
    }

    /// Prints latency percentiles recorded for `add` and `get`.
    #[cfg(feature = "profiler")]
    pub fn print_stats(&self) {
        self.stats.print("CountWindow");
    }
}
