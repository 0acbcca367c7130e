//! movsum provides small sliding-window accumulators that maintain a running
//! sum and count of numeric observations without storing every observation
//! indefinitely.
//!
//! Three independent window types are provided, each exposing `add` and
//! `get`:
//!
//! - [`CountWindow`] keeps the last N observations, evicting FIFO by count.
//! - [`TimeWindow`] keeps individually timestamped observations and expires
//!   them exactly once they are a full window duration old.
//! - [`SlottedWindow`] partitions the duration into a fixed ring of slots,
//!   bounding memory at the cost of slot-width precision.
//!
//! The time-based windows read time through an injectable [`Clock`], so
//! rotation and expiry boundaries are exactly reproducible in tests via
//! [`ManualClock`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use movsum::TimeWindow;
//!
//! let window = TimeWindow::new(Duration::from_secs(60));
//! window.add(100);
//! window.add(50);
//! let (sum, count) = window.get();
//! assert_eq!((sum, count), (150, 2));
//! ```
//!
//! # Feature flags
//!
//! - `std` (default): enables [`SystemClock`].
//! - `sync`: windows become `Send + Sync` handles backed by a
//!   `parking_lot::Mutex`; without it state sits behind `Rc<RefCell>` for
//!   single-threaded use.
//! - `profiler`: records `add`/`get` latency sketches per window, printable
//!   with `print_stats`.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Pluggable monotonic time sources for the time-based windows.
pub mod clock;
/// The sliding-window accumulators.
pub mod window;

mod inner;
mod macros;

#[cfg(feature = "profiler")]
mod stats;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use window::{count::CountWindow, slotted::SlottedWindow, time::TimeWindow};
