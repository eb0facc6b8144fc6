//! # Tactile Core
//!
//! Time substrate for the Tactile interaction primitives:
//! - Injectable clocks (wall clock for production, manual clock for tests)
//! - A cooperative, single-thread timer queue with cancellable handles
//!
//! ## Architecture Rules
//!
//! 1. **No ambient time** - primitives never call `Instant::now()` directly
//! 2. **One logical thread** - timers fire only when the host pumps the queue
//! 3. **Cancellation is final** - a cancelled timer never fires
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use tactile_core::{ManualClock, TimerQueue};
//!
//! let clock = Rc::new(ManualClock::new());
//! let timers = TimerQueue::new(clock.clone());
//!
//! timers.schedule_after(Duration::from_millis(300), || println!("fired"));
//! clock.advance(Duration::from_millis(300));
//! assert_eq!(timers.run_due(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use timer::{TimerId, TimerQueue, WeakTimerQueue};
