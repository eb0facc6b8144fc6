//! Two-state animated toggle.
//!
//! ```text
//!            flip(true)                    flip(false)
//!   ┌─────┐ ───────────► Transitioning ◄──────────── ┌────┐
//!   │ OFF │                (0 ◄──► 1)                │ ON │
//!   └─────┘ ◄─────────── interruptible ────────────► └────┘
//!          converges                       converges
//! ```
//!
//! The logical boolean is authoritative and changes the instant a flip is
//! accepted. The transition value trails it, animated by frame ticks on the
//! shared [`TimerQueue`]. A flip that lands mid-transition retargets the
//! running animation from wherever it sits; it never queues a second one.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use tactile_core::{TimerId, TimerQueue};

use crate::animation::Animation;
use crate::config::ToggleConfig;

/// Observable state of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// At rest, transition value 0.
    Off,
    /// At rest, transition value 1.
    On,
    /// Animating toward the given logical state.
    Transitioning {
        /// Logical state being animated toward.
        toward: bool,
    },
}

type ChangeHook = Box<dyn FnMut(bool)>;
type FrameHook = Box<dyn FnMut(f32)>;

/// A hook invocation waiting to be delivered.
#[derive(Debug, Clone, Copy)]
enum Notice {
    Changed(bool),
    Frame(f32),
}

struct ToggleInner {
    logical: bool,
    animation: Animation,
    /// Instant the animation was last advanced to.
    last_tick: Instant,
    /// Pending frame tick, if the driver is running.
    frame: Option<TimerId>,
    on_change: Option<ChangeHook>,
    on_frame: Option<FrameHook>,
    /// Hook invocations in the order they were produced.
    notices: VecDeque<Notice>,
    /// Set while the outermost caller drains `notices`.
    delivering: bool,
}

impl ToggleInner {
    /// Advances the animation to `now`.
    fn sync(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_tick);
        self.animation.update(dt.as_secs_f32());
        self.last_tick = now;
    }
}

/// Animated on/off control state.
pub struct Toggle {
    inner: Rc<RefCell<ToggleInner>>,
    timers: TimerQueue,
    frame_interval: Duration,
}

impl Toggle {
    /// Creates a toggle at rest in `initial`.
    #[must_use]
    pub fn new(initial: bool, config: &ToggleConfig, timers: &TimerQueue) -> Self {
        let animation = Animation::new(endpoint(initial), config.easing)
            .with_duration(config.duration().as_secs_f32());

        Self {
            inner: Rc::new(RefCell::new(ToggleInner {
                logical: initial,
                animation,
                last_tick: timers.now(),
                frame: None,
                on_change: None,
                on_frame: None,
                notices: VecDeque::new(),
                delivering: false,
            })),
            timers: timers.clone(),
            frame_interval: config.frame_interval().max(Duration::from_millis(1)),
        }
    }

    /// Registers the logical-change notification.
    ///
    /// Runs exactly once per accepted flip, with the new logical state. A
    /// flip issued from inside the hook is delivered after the current call
    /// returns, in order.
    #[must_use]
    pub fn with_on_change(self, hook: impl FnMut(bool) + 'static) -> Self {
        self.inner.borrow_mut().on_change = Some(Box::new(hook));
        self
    }

    /// Registers a per-frame hook receiving the transition value.
    ///
    /// Hosts use it to request a redraw while the animation runs.
    #[must_use]
    pub fn with_on_frame(self, hook: impl FnMut(f32) + 'static) -> Self {
        self.inner.borrow_mut().on_frame = Some(Box::new(hook));
        self
    }

    /// Requests a logical state.
    ///
    /// Returns false (and does nothing) if `on` is already the logical
    /// state, including when the toggle is already animating toward it.
    pub fn flip(&self, on: bool) -> bool {
        let start_driver = {
            let mut inner = self.inner.borrow_mut();
            if inner.logical == on {
                return false;
            }

            inner.sync(self.timers.now());
            inner.logical = on;
            inner.animation.retarget(endpoint(on));
            inner.notices.push_back(Notice::Changed(on));

            !inner.animation.is_complete() && inner.frame.is_none()
        };

        tracing::trace!(on, "toggle flipped");

        if start_driver {
            let id = schedule_frame(&self.inner, &self.timers, self.frame_interval);
            self.inner.borrow_mut().frame = Some(id);
        }

        deliver(&self.inner);
        true
    }

    /// Flips to the opposite logical state.
    pub fn toggle(&self) -> bool {
        let on = self.is_on();
        self.flip(!on)
    }

    /// Applies a textual flip request.
    ///
    /// Accepts `on`/`off`, `true`/`false`, `yes`/`no` and `1`/`0`, case
    /// insensitive. Anything else is ignored.
    pub fn flip_input(&self, input: &str) -> bool {
        match parse_flip(input) {
            Some(on) => self.flip(on),
            None => {
                tracing::debug!(input, "ignoring unrecognized toggle input");
                false
            }
        }
    }

    /// Returns the authoritative logical state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.inner.borrow().logical
    }

    /// Returns the transition value in `[0, 1]` at the current instant.
    #[must_use]
    pub fn transition_value(&self) -> f32 {
        let mut inner = self.inner.borrow_mut();
        inner.sync(self.timers.now());
        inner.animation.value()
    }

    /// Returns the observable state at the current instant.
    #[must_use]
    pub fn state(&self) -> ToggleState {
        let mut inner = self.inner.borrow_mut();
        inner.sync(self.timers.now());
        match (inner.animation.is_complete(), inner.logical) {
            (false, toward) => ToggleState::Transitioning { toward },
            (true, true) => ToggleState::On,
            (true, false) => ToggleState::Off,
        }
    }

    /// Returns true while the transition value is still moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.sync(self.timers.now());
        !inner.animation.is_complete()
    }
}

impl Drop for Toggle {
    fn drop(&mut self) {
        if let Some(id) = self.inner.borrow_mut().frame.take() {
            self.timers.cancel(id);
        }
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Toggle")
            .field("logical", &inner.logical)
            .field("animation", &inner.animation)
            .field("frame", &inner.frame)
            .finish_non_exhaustive()
    }
}

/// Transition value a logical state converges to.
const fn endpoint(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

fn parse_flip(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Schedules the next animation frame for `inner`.
///
/// The callback holds only weak references, so a frame that fires after
/// the toggle is gone does nothing.
fn schedule_frame(
    inner: &Rc<RefCell<ToggleInner>>,
    timers: &TimerQueue,
    interval: Duration,
) -> TimerId {
    let weak_inner: Weak<RefCell<ToggleInner>> = Rc::downgrade(inner);
    let weak_timers = timers.downgrade();

    timers.schedule_after(interval, move || {
        let (Some(inner), Some(timers)) = (weak_inner.upgrade(), weak_timers.upgrade()) else {
            return;
        };

        let complete = {
            let mut state = inner.borrow_mut();
            state.frame = None;
            state.sync(timers.now());
            let value = state.animation.value();
            state.notices.push_back(Notice::Frame(value));
            state.animation.is_complete()
        };

        if !complete {
            let id = schedule_frame(&inner, &timers, interval);
            inner.borrow_mut().frame = Some(id);
        }

        deliver(&inner);
    })
}

/// Runs queued hook invocations in order.
///
/// Only the outermost caller drains the queue. A nested call (a hook that
/// flips the toggle, or pumps the timer queue) just enqueues, and its notice
/// is delivered by the loop below once the running hook returns.
fn deliver(inner: &Rc<RefCell<ToggleInner>>) {
    {
        let mut state = inner.borrow_mut();
        if state.delivering {
            return;
        }
        state.delivering = true;
    }
    let _guard = Delivering(inner);

    loop {
        let next = inner.borrow_mut().notices.pop_front();
        match next {
            None => break,
            Some(Notice::Changed(on)) => {
                let hook = inner.borrow_mut().on_change.take();
                if let Some(mut hook) = hook {
                    hook(on);
                    inner.borrow_mut().on_change = Some(hook);
                }
            }
            Some(Notice::Frame(value)) => {
                let hook = inner.borrow_mut().on_frame.take();
                if let Some(mut hook) = hook {
                    hook(value);
                    inner.borrow_mut().on_frame = Some(hook);
                }
            }
        }
    }
}

/// Ends a delivery pass, even when a hook panics.
struct Delivering<'a>(&'a Rc<RefCell<ToggleInner>>);

impl Drop for Delivering<'_> {
    fn drop(&mut self) {
        let mut state = self.0.borrow_mut();
        state.delivering = false;
        state.notices.clear();
    }
}
