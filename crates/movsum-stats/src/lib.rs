//! Profiling utilities for movsum.
//!
//! The crate provides a cheap [`Sketch`] for recording nanosecond latencies
//! and a [`profile_scope!`] macro that measures the enclosing scope through a
//! RAII guard. Percentile snapshots are taken with [`Sketch::percentiles`].
#![deny(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::{Arc, Mutex};

use sketches_ddsketch::{Config, DDSketch};

/// A concurrency-safe quantile sketch of nanosecond latencies.
///
/// Cloning is cheap and clones share the same underlying sketch, so a
/// `Sketch` can be embedded in a handle that is cloned across threads.
#[derive(Clone)]
pub struct Sketch {
    inner: Arc<Mutex<DDSketch>>,
}

impl core::fmt::Debug for Sketch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sketch").finish_non_exhaustive()
    }
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DDSketch::new(Config::defaults()))),
        }
    }
}

impl Sketch {
    /// Records a single latency measurement in nanoseconds.
    #[inline]
    pub fn add(&self, nanos: f64) {
        self.inner.lock().unwrap().add(nanos);
    }

    /// Takes a snapshot of the recorded percentiles.
    pub fn percentiles(&self) -> Percentiles {
        let sketch = self.inner.lock().unwrap();
        let quantile = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
        Percentiles {
            count: sketch.count(),
            min: sketch.min().unwrap_or(0.0),
            p50: quantile(0.5),
            p99: quantile(0.99),
            p99_9: quantile(0.999),
            p99_99: quantile(0.9999),
            p99_999: quantile(0.99999),
            max: sketch.max().unwrap_or(0.0),
        }
    }
}

/// Percentile snapshot of a [`Sketch`], in nanoseconds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy)]
#[allow(missing_docs)]
pub struct Percentiles {
    pub count: usize,
    pub min: f64,
    pub p50: f64,
    pub p99: f64,
    pub p99_9: f64,
    pub p99_99: f64,
    pub p99_999: f64,
    pub max: f64,
}

/// Guard that records the time from its creation until drop into a [`Sketch`].
///
/// Usually created through [`profile_scope!`].
#[derive(Debug)]
pub struct ScopedTimer<'a> {
    sketch: &'a Sketch,
    start: minstant::Instant,
}

impl<'a> ScopedTimer<'a> {
    /// Starts a measurement that is recorded into `sketch` on drop.
    pub fn new(sketch: &'a Sketch) -> Self {
        Self {
            sketch,
            start: minstant::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}

/// Records the time spent in the remainder of the current scope into the
/// given [`Sketch`].
///
/// # Example
///
/// ```
/// use movsum_stats::{Sketch, profile_scope};
///
/// let sketch = Sketch::default();
/// {
///     profile_scope!(&sketch);
///     // measured work
/// }
/// assert_eq!(sketch.percentiles().count, 1);
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _profile_guard = $crate::ScopedTimer::new($sketch);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_measurements() {
        let sketch = Sketch::default();
        for _ in 0..100 {
            profile_scope!(&sketch);
        }
        let percentiles = sketch.percentiles();
        assert_eq!(percentiles.count, 100);
        assert!(percentiles.min >= 0.0);
        assert!(percentiles.max >= percentiles.min);
    }

    #[test]
    fn clones_share_the_sketch() {
        let sketch = Sketch::default();
        let clone = sketch.clone();
        sketch.add(10.0);
        clone.add(20.0);
        assert_eq!(sketch.percentiles().count, 2);
    }
}
