//! Scheduler gates: debounce and throttle.
//!
//! A [`Gate`] sits between a rapid stream of trigger events (keystrokes,
//! scroll ticks, layout passes) and a side-effecting action, deciding which
//! triggers are allowed to reach the action.
//!
//! ```text
//!  trigger ──► Gate ──┬─ Debounce: cancel pending timer, schedule new one
//!                     │            └─► action(args of last call) after quiet period
//!                     └─ Throttle: elapsed >= delay ? action(args) now : drop
//! ```
//!
//! Throttling is leading-edge only. Calls that land inside the window are
//! dropped; there is no trailing flush.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tactile_core::{TimerId, TimerQueue};

use crate::config::GateConfig;

/// Gating policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Fire once, `delay` after the last trigger of a burst.
    Debounce,
    /// Fire at most once per `delay` window, on the leading edge.
    Throttle,
}

/// What a single [`Gate::trigger`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The action ran synchronously (throttle).
    Fired,
    /// The action is scheduled on the timer queue (debounce).
    Scheduled,
    /// The call landed inside the throttle window and was discarded.
    Dropped,
}

type Action<A> = Rc<RefCell<Box<dyn FnMut(A)>>>;

/// Rate gate around a caller-supplied action.
///
/// Each gate owns at most one pending timer and never shares state with
/// other gates. Dropping the gate cancels any pending debounced call.
pub struct Gate<A> {
    action: Action<A>,
    delay: Duration,
    mode: GateMode,
    timers: TimerQueue,
    /// Pending debounced call.
    pending: Option<TimerId>,
    /// Last throttled execution.
    last_fire: Option<Instant>,
}

impl<A: 'static> Gate<A> {
    /// Creates a gate that forwards triggers to `action` under `mode`.
    pub fn new(
        action: impl FnMut(A) + 'static,
        delay: Duration,
        mode: GateMode,
        timers: &TimerQueue,
    ) -> Self {
        Self {
            action: Rc::new(RefCell::new(Box::new(action))),
            delay,
            mode,
            timers: timers.clone(),
            pending: None,
            last_fire: None,
        }
    }

    /// Creates a gate whose delay comes from `config` for `mode`.
    pub fn from_config(
        action: impl FnMut(A) + 'static,
        config: &GateConfig,
        mode: GateMode,
        timers: &TimerQueue,
    ) -> Self {
        Self::new(action, config.delay(mode), mode, timers)
    }

    /// Creates a debouncing gate.
    pub fn debounce(action: impl FnMut(A) + 'static, delay: Duration, timers: &TimerQueue) -> Self {
        Self::new(action, delay, GateMode::Debounce, timers)
    }

    /// Creates a leading-edge throttling gate.
    pub fn throttle(action: impl FnMut(A) + 'static, delay: Duration, timers: &TimerQueue) -> Self {
        Self::new(action, delay, GateMode::Throttle, timers)
    }

    /// Offers one trigger event to the gate.
    ///
    /// In throttle mode a panic raised by the action propagates from this
    /// call. In debounce mode it propagates from [`TimerQueue::run_due`]
    /// when the timer fires.
    pub fn trigger(&mut self, args: A) -> GateOutcome {
        match self.mode {
            GateMode::Debounce => self.debounce_trigger(args),
            GateMode::Throttle => self.throttle_trigger(args),
        }
    }

    /// Cancels a pending debounced call.
    ///
    /// Returns true if a call was pending. Throttle gates have nothing to
    /// cancel; their window keeps running.
    pub fn cancel(&mut self) -> bool {
        let Some(id) = self.pending.take() else {
            return false;
        };
        let cancelled = self.timers.cancel(id);
        if cancelled {
            tracing::debug!(timer = id.raw(), "debounced call cancelled");
        }
        cancelled
    }

    /// Returns true if a debounced call is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some_and(|id| self.timers.is_scheduled(id))
    }

    /// Returns the configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the gating policy.
    #[must_use]
    pub fn mode(&self) -> GateMode {
        self.mode
    }

    fn debounce_trigger(&mut self, args: A) -> GateOutcome {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }

        let action = Rc::clone(&self.action);
        let id = self.timers.schedule_after(self.delay, move || {
            let mut action = action.borrow_mut();
            (action.as_mut())(args);
        });
        tracing::trace!(timer = id.raw(), delay = ?self.delay, "debounced call scheduled");
        self.pending = Some(id);
        GateOutcome::Scheduled
    }

    fn throttle_trigger(&mut self, args: A) -> GateOutcome {
        let now = self.timers.now();
        let open = self
            .last_fire
            .map_or(true, |last| now.saturating_duration_since(last) >= self.delay);

        if !open {
            tracing::debug!(delay = ?self.delay, "throttled call dropped");
            return GateOutcome::Dropped;
        }

        self.last_fire = Some(now);
        let mut action = self.action.borrow_mut();
        (action.as_mut())(args);
        GateOutcome::Fired
    }
}

impl<A> Drop for Gate<A> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
    }
}

impl<A> fmt::Debug for Gate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("mode", &self.mode)
            .field("delay", &self.delay)
            .field("pending", &self.pending)
            .field("last_fire", &self.last_fire)
            .finish_non_exhaustive()
    }
}
