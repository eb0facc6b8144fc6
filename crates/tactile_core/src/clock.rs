//! Injectable time sources.
//!
//! Every time-dependent primitive reads "now" through a [`Clock`] so that
//! debounce windows and animation progress can be tested without waiting
//! on the wall clock.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests and replays.
///
/// Time only moves when [`ManualClock::advance`] or [`ManualClock::set`]
/// is called. It never goes backwards.
#[derive(Debug)]
pub struct ManualClock {
    /// Instant captured at construction.
    origin: Instant,
    /// Offset from `origin`.
    elapsed: Cell<Duration>,
}

impl ManualClock {
    /// Creates a clock frozen at its origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(by));
    }

    /// Moves the clock to `elapsed` past its origin.
    ///
    /// Requests to move backwards are ignored.
    pub fn set(&self, elapsed: Duration) {
        if elapsed > self.elapsed.get() {
            self.elapsed.set(elapsed);
        }
    }

    /// Returns the time elapsed since the origin.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Returns the instant the clock was created at.
    #[must_use]
    pub fn origin(&self) -> Instant {
        self.origin
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}
