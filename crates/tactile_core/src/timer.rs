//! Cooperative single-thread timer queue.
//!
//! The queue never spawns threads and never fires on its own. The host
//! event loop pumps it with [`TimerQueue::run_due`], which fires every
//! callback whose deadline has passed on the injected [`Clock`].
//!
//! ## Ordering
//!
//! ```text
//!   schedule_after(300ms, a)   ─┐
//!   schedule_after(100ms, b)   ─┼─► BTreeMap<(deadline, seq), callback>
//!   schedule_after(300ms, c)   ─┘
//!
//!   run_due() at +300ms fires: b, a, c
//! ```
//!
//! Equal deadlines fire in scheduling order. A callback scheduled while
//! `run_due` is firing waits for the next pass, so a zero-delay timer that
//! reschedules itself cannot starve the host loop.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::clock::Clock;

/// Handle of one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw sequence number.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type Callback = Box<dyn FnOnce()>;

/// Shared queue state.
#[derive(Default)]
struct QueueState {
    /// Pending callbacks ordered by deadline, then scheduling order.
    entries: BTreeMap<(Instant, u64), Callback>,
    /// Deadline lookup for cancellation.
    deadlines: HashMap<u64, Instant>,
    /// Next sequence number.
    next_seq: u64,
}

/// Cloneable handle to a single-thread timer queue.
///
/// All clones share the same pending set. The queue is `!Send`: it belongs
/// to the one logical UI thread that pumps it.
#[derive(Clone)]
pub struct TimerQueue {
    state: Rc<RefCell<QueueState>>,
    clock: Rc<dyn Clock>,
}

/// Non-owning handle to a [`TimerQueue`].
///
/// Timer callbacks that need to reschedule themselves hold this instead of
/// a full handle so the queue does not keep itself alive.
#[derive(Clone)]
pub struct WeakTimerQueue {
    state: Weak<RefCell<QueueState>>,
    clock: Rc<dyn Clock>,
}

impl TimerQueue {
    /// Creates an empty queue reading time from `clock`.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            state: Rc::new(RefCell::new(QueueState::default())),
            clock,
        }
    }

    /// Returns the current instant of the underlying clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Returns the clock this queue reads.
    #[must_use]
    pub fn clock(&self) -> Rc<dyn Clock> {
        Rc::clone(&self.clock)
    }

    /// Schedules `callback` to fire `delay` from now.
    ///
    /// # Panics
    ///
    /// Panics if `now + delay` overflows [`Instant`].
    pub fn schedule_after(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        self.schedule_at(self.clock.now() + delay, callback)
    }

    /// Schedules `callback` to fire at `deadline`.
    ///
    /// A deadline in the past fires on the next [`TimerQueue::run_due`].
    pub fn schedule_at(&self, deadline: Instant, callback: impl FnOnce() + 'static) -> TimerId {
        let mut state = self.state.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert((deadline, seq), Box::new(callback));
        state.deadlines.insert(seq, deadline);
        tracing::trace!(timer = seq, pending = state.entries.len(), "timer scheduled");
        TimerId(seq)
    }

    /// Cancels a pending timer.
    ///
    /// Returns `false` if the timer already fired or was already cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(deadline) = state.deadlines.remove(&id.0) else {
            return false;
        };
        state.entries.remove(&(deadline, id.0));
        tracing::trace!(timer = id.0, "timer cancelled");
        true
    }

    /// Returns true if the timer is still waiting to fire.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.state.borrow().deadlines.contains_key(&id.0)
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Returns true if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .borrow()
            .entries
            .keys()
            .next()
            .map(|(deadline, _)| *deadline)
    }

    /// Fires every callback due at the current clock instant.
    ///
    /// Callbacks run with no internal borrow held, so they may schedule or
    /// cancel timers on this queue. Timers scheduled during this pass wait
    /// for the next one. A panic inside a callback propagates to the caller;
    /// the panicking timer is already removed from the queue.
    ///
    /// Returns the number of callbacks fired.
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let horizon = self.state.borrow().next_seq;
        let mut fired = 0;

        while let Some((seq, callback)) = self.pop_due(now, horizon) {
            tracing::trace!(timer = seq, "timer fired");
            callback();
            fired += 1;
        }

        fired
    }

    /// Returns a non-owning handle to this queue.
    #[must_use]
    pub fn downgrade(&self) -> WeakTimerQueue {
        WeakTimerQueue {
            state: Rc::downgrade(&self.state),
            clock: Rc::clone(&self.clock),
        }
    }

    /// Removes the earliest due entry scheduled before `horizon`.
    fn pop_due(&self, now: Instant, horizon: u64) -> Option<(u64, Callback)> {
        let mut state = self.state.borrow_mut();
        let key = state
            .entries
            .range(..=(now, u64::MAX))
            .map(|(key, _)| *key)
            .find(|(_, seq)| *seq < horizon)?;
        let callback = state.entries.remove(&key)?;
        state.deadlines.remove(&key.1);
        Some((key.1, callback))
    }
}

impl WeakTimerQueue {
    /// Upgrades to a full handle if the queue is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<TimerQueue> {
        self.state.upgrade().map(|state| TimerQueue {
            state,
            clock: Rc::clone(&self.clock),
        })
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.len())
            .field("next_deadline", &self.next_deadline())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for WeakTimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakTimerQueue")
            .field("alive", &(self.state.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn setup() -> (Rc<ManualClock>, TimerQueue) {
        let clock = Rc::new(ManualClock::new());
        let timers = TimerQueue::new(clock.clone());
        (clock, timers)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_only_when_due() {
        let (clock, timers) = setup();
        let hits = Rc::new(RefCell::new(0));

        let h = Rc::clone(&hits);
        timers.schedule_after(ms(300), move || *h.borrow_mut() += 1);

        clock.advance(ms(299));
        assert_eq!(timers.run_due(), 0);
        assert_eq!(*hits.borrow(), 0);

        clock.advance(ms(1));
        assert_eq!(timers.run_due(), 1);
        assert_eq!(*hits.borrow(), 1);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_deadline_then_schedule_order() {
        let (clock, timers) = setup();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (name, delay) in [("a", 300), ("b", 100), ("c", 300)] {
            let o = Rc::clone(&order);
            timers.schedule_after(ms(delay), move || o.borrow_mut().push(name));
        }

        clock.advance(ms(300));
        assert_eq!(timers.run_due(), 3);
        assert_eq!(*order.borrow(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let (clock, timers) = setup();
        let hits = Rc::new(RefCell::new(0));

        let h = Rc::clone(&hits);
        let id = timers.schedule_after(ms(50), move || *h.borrow_mut() += 1);
        assert!(timers.is_scheduled(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(!timers.is_scheduled(id));

        clock.advance(ms(100));
        assert_eq!(timers.run_due(), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_callback_may_reschedule_without_starving() {
        let (clock, timers) = setup();
        let hits = Rc::new(RefCell::new(0));

        let weak = timers.downgrade();
        let h = Rc::clone(&hits);
        timers.schedule_after(Duration::ZERO, move || {
            *h.borrow_mut() += 1;
            if let Some(timers) = weak.upgrade() {
                let h = Rc::clone(&h);
                timers.schedule_after(Duration::ZERO, move || *h.borrow_mut() += 1);
            }
        });

        assert_eq!(timers.run_due(), 1);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(timers.len(), 1);

        clock.advance(ms(1));
        assert_eq!(timers.run_due(), 1);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_next_deadline_tracks_earliest() {
        let (clock, timers) = setup();
        assert!(timers.next_deadline().is_none());

        timers.schedule_after(ms(200), || {});
        let early = timers.schedule_after(ms(50), || {});

        assert_eq!(timers.next_deadline(), Some(clock.now() + ms(50)));
        timers.cancel(early);
        assert_eq!(timers.next_deadline(), Some(clock.now() + ms(200)));
    }

    #[test]
    fn test_weak_handle_does_not_keep_queue_alive() {
        let (_clock, timers) = setup();
        let weak = timers.downgrade();
        assert!(weak.upgrade().is_some());

        drop(timers);
        assert!(weak.upgrade().is_none());
    }
}
