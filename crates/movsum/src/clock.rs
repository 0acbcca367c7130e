use core::time::Duration;

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use core::sync::atomic::{AtomicU64, Ordering};

/// A monotonic time source injected into the time-based windows.
///
/// Readings are nanoseconds since the clock's own epoch (whatever instant
/// the implementation anchors on). Implementations should be monotonic; the
/// windows tolerate a reading that moves backwards by treating it as no
/// elapsed time.
///
/// Production wiring uses [`SystemClock`]; tests substitute [`ManualClock`]
/// to make rotation and expiry boundaries exactly reproducible.
pub trait Clock {
    /// Returns the current reading in nanoseconds since the clock's epoch.
    fn now(&self) -> u64;

    /// Returns the nanoseconds elapsed between an `earlier` reading and now.
    ///
    /// Saturates at zero if the clock has moved backwards.
    #[inline]
    fn since(&self, earlier: u64) -> u64 {
        self.now().saturating_sub(earlier)
    }
}

/// Converts a [`Duration`] to whole nanoseconds, saturating at `u64::MAX`.
pub(crate) fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Monotonic wall-clock time source backed by [`minstant`].
///
/// Readings are nanoseconds since the clock was created.
///
/// # Example
///
/// ```
/// use movsum::{Clock, SystemClock};
///
/// let clock = SystemClock::new();
/// let earlier = clock.now();
/// assert!(clock.since(earlier) < 1_000_000_000);
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: minstant::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock anchored at the current instant.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: minstant::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Deterministic clock for tests, advanced by hand.
///
/// Cloning is cheap and clones share the same reading, so the test driver
/// keeps one handle while the window owns another.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use movsum::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(5));
/// assert_eq!(clock.now(), 5_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    reading: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.reading.fetch_add(nanos(duration), Ordering::Relaxed);
    }

    /// Sets the reading to `elapsed` past the clock's epoch.
    ///
    /// May move the clock backwards; the windows treat that as no elapsed
    /// time.
    pub fn set(&self, elapsed: Duration) {
        self.reading.store(nanos(elapsed), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> u64 {
        self.reading.load(Ordering::Relaxed)
    }
}
