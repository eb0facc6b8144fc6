//! Render-fault recovery boundary.
//!
//! ## State machine
//!
//! ```text
//!                 render() -> Err(fault)
//!                 on_fault(fault)
//!   ┌─────────┐ ─────────────────────────► ┌─────────────────┐
//!   │ Healthy │                            │ Faulted(fault)  │
//!   └─────────┘ ◄───────────────────────── └─────────────────┘
//!      ▲    │             reset()                  │
//!      └────┘                                      └─► fallback view only
//!    render() -> Ok(subtree)
//! ```
//!
//! A captured fault is logged exactly once (tracing + [`FaultLog`]) and the
//! wrapped subtree is not rendered again until [`RecoveryBoundary::reset`].
//! There is no automatic retry. If the fault persists, the first render after
//! a reset faults again and the boundary re-enters `Faulted`.
//!
//! Fallback content must not fail: the fallback function returns `T`, not a
//! `Result`, and the boundary does not guard it.

mod fault;
mod log;

pub use fault::Fault;
pub use log::{FaultLog, FaultRecord};

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::BoundaryConfig;

/// Boundary state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    /// Rendering the wrapped subtree.
    Healthy,
    /// Rendering the fallback view.
    Faulted(Fault),
}

/// What the fallback view gets to see.
#[derive(Debug, Clone, Copy)]
pub struct FallbackContext<'a> {
    boundary: &'a str,
    fault: &'a Fault,
    development: bool,
}

impl<'a> FallbackContext<'a> {
    /// Name of the boundary rendering the fallback.
    #[must_use]
    pub fn boundary(&self) -> &'a str {
        self.boundary
    }

    /// Fault detail, exposed only in a development configuration.
    #[must_use]
    pub fn detail(&self) -> Option<&'a Fault> {
        self.development.then_some(self.fault)
    }

    /// Returns true in a development configuration.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.development
    }
}

type Subtree<T> = Box<dyn FnMut() -> Result<T, Fault>>;
type Fallback<T> = Box<dyn Fn(&FallbackContext<'_>) -> T>;

/// Supervisor around a subtree-producing function.
pub struct RecoveryBoundary<T> {
    name: String,
    subtree: Subtree<T>,
    fallback: Fallback<T>,
    state: BoundaryState,
    config: BoundaryConfig,
    log: FaultLog,
    on_fault: Option<Box<dyn FnMut(&Fault)>>,
    on_reset: Option<Box<dyn FnMut()>>,
}

impl<T> RecoveryBoundary<T> {
    /// Creates a healthy boundary.
    pub fn new(
        name: impl Into<String>,
        subtree: impl FnMut() -> Result<T, Fault> + 'static,
        fallback: impl Fn(&FallbackContext<'_>) -> T + 'static,
        config: BoundaryConfig,
    ) -> Self {
        Self {
            name: name.into(),
            subtree: Box::new(subtree),
            fallback: Box::new(fallback),
            state: BoundaryState::Healthy,
            log: FaultLog::new(config.log_capacity),
            config,
            on_fault: None,
            on_reset: None,
        }
    }

    /// Creates a healthy boundary whose fallback is `T::default()`.
    pub fn with_default_fallback(
        name: impl Into<String>,
        subtree: impl FnMut() -> Result<T, Fault> + 'static,
        config: BoundaryConfig,
    ) -> Self
    where
        T: Default + 'static,
    {
        Self::new(name, subtree, |_: &FallbackContext<'_>| T::default(), config)
    }

    /// Writes captured faults to a shared log instead of a private one.
    #[must_use]
    pub fn with_log(mut self, log: FaultLog) -> Self {
        self.log = log;
        self
    }

    /// Registers a hook run after each Healthy → Faulted transition.
    #[must_use]
    pub fn with_on_fault(mut self, hook: impl FnMut(&Fault) + 'static) -> Self {
        self.on_fault = Some(Box::new(hook));
        self
    }

    /// Registers a hook run after each Faulted → Healthy transition.
    #[must_use]
    pub fn with_on_reset(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(hook));
        self
    }

    /// Renders the subtree, or the fallback view while faulted.
    ///
    /// A subtree error transitions the boundary to `Faulted` and the
    /// fallback is returned in its place; the error never escapes.
    pub fn render(&mut self) -> T {
        if let BoundaryState::Faulted(fault) = &self.state {
            return self.fallback_for(fault);
        }

        match (self.subtree)() {
            Ok(tree) => tree,
            Err(fault) => self.fail_over(fault),
        }
    }

    /// Like [`RecoveryBoundary::render`], but also intercepts panics raised
    /// by the subtree function and treats them as faults.
    ///
    /// Only effective when the binary is built with `panic = "unwind"`.
    pub fn render_catching(&mut self) -> T {
        if let BoundaryState::Faulted(fault) = &self.state {
            return self.fallback_for(fault);
        }

        let subtree = &mut self.subtree;
        let outcome = match catch_unwind(AssertUnwindSafe(|| subtree())) {
            Ok(result) => result,
            Err(payload) => Err(Fault::from_panic(payload.as_ref())),
        };

        match outcome {
            Ok(tree) => tree,
            Err(fault) => self.fail_over(fault),
        }
    }

    /// Reports a fault detected outside `render` (async loaders, layout).
    ///
    /// Returns true if the boundary transitioned to `Faulted`. A fault
    /// reported while already faulted is ignored; the first fault is kept.
    pub fn on_fault(&mut self, fault: Fault) -> bool {
        if let BoundaryState::Faulted(current) = &self.state {
            tracing::debug!(
                boundary = %self.name,
                current = %current,
                ignored = %fault,
                "boundary already faulted"
            );
            return false;
        }
        self.capture(fault);
        true
    }

    /// Clears the captured fault and resumes rendering the subtree.
    ///
    /// Returns false if the boundary was already healthy.
    pub fn reset(&mut self) -> bool {
        let previous = std::mem::replace(&mut self.state, BoundaryState::Healthy);
        let BoundaryState::Faulted(fault) = previous else {
            return false;
        };

        tracing::info!(boundary = %self.name, cleared = %fault, "boundary reset");
        if let Some(hook) = self.on_reset.as_mut() {
            hook();
        }
        true
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    /// Returns true while the fallback view is shown.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        matches!(self.state, BoundaryState::Faulted(_))
    }

    /// Returns the captured fault, if any.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        match &self.state {
            BoundaryState::Faulted(fault) => Some(fault),
            BoundaryState::Healthy => None,
        }
    }

    /// Returns the boundary's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fault log this boundary writes to.
    #[must_use]
    pub fn log(&self) -> &FaultLog {
        &self.log
    }

    fn capture(&mut self, fault: Fault) {
        let sequence = self.log.record(&self.name, &fault);
        tracing::error!(
            boundary = %self.name,
            sequence,
            fault = %fault,
            trace = ?fault.trace(),
            "render fault captured"
        );

        if let Some(hook) = self.on_fault.as_mut() {
            hook(&fault);
        }
        self.state = BoundaryState::Faulted(fault);
    }

    /// Captures `fault` and returns the fallback view for it.
    fn fail_over(&mut self, fault: Fault) -> T {
        let view = self.fallback_for(&fault);
        self.capture(fault);
        view
    }

    fn fallback_for(&self, fault: &Fault) -> T {
        (self.fallback)(&FallbackContext {
            boundary: &self.name,
            fault,
            development: self.config.development,
        })
    }
}

impl<T> fmt::Debug for RecoveryBoundary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryBoundary")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn config(development: bool) -> BoundaryConfig {
        BoundaryConfig {
            development,
            log_capacity: 16,
        }
    }

    fn fallback(ctx: &FallbackContext<'_>) -> String {
        match ctx.detail() {
            Some(fault) => format!("fallback: {fault}"),
            None => "fallback".to_string(),
        }
    }

    #[test]
    fn test_healthy_renders_subtree() {
        let mut boundary =
            RecoveryBoundary::new("card", || Ok("card".to_string()), fallback, config(false));
        assert_eq!(boundary.render(), "card");
        assert_eq!(boundary.state(), &BoundaryState::Healthy);
        assert!(boundary.log().is_empty());
    }

    #[test]
    fn test_fault_switches_to_fallback_and_logs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut boundary = RecoveryBoundary::new(
            "chart",
            move || {
                counter.set(counter.get() + 1);
                Err(Fault::new("X"))
            },
            fallback,
            config(false),
        );

        assert_eq!(boundary.render(), "fallback");
        assert_eq!(boundary.fault().map(Fault::message), Some("X"));
        assert_eq!(boundary.render(), "fallback");
        assert_eq!(boundary.render(), "fallback");

        assert_eq!(calls.get(), 1, "subtree is frozen while faulted");
        assert_eq!(boundary.log().len(), 1);
        assert_eq!(boundary.log().last().unwrap().message, "X");
    }

    #[test]
    fn test_persistent_fault_reenters_after_reset() {
        let mut boundary = RecoveryBoundary::new(
            "tabs",
            || Err::<String, _>(Fault::new("still broken")),
            fallback,
            config(false),
        );

        boundary.render();
        assert!(boundary.reset());
        assert_eq!(boundary.state(), &BoundaryState::Healthy);

        boundary.render();
        assert!(boundary.is_faulted());
        assert_eq!(boundary.log().len(), 2, "no deduplication");
    }

    #[test]
    fn test_transient_fault_recovers_after_reset() {
        let broken = Rc::new(Cell::new(true));
        let flag = Rc::clone(&broken);
        let mut boundary = RecoveryBoundary::new(
            "toast",
            move || {
                if flag.get() {
                    Err(Fault::new("offline"))
                } else {
                    Ok("toast".to_string())
                }
            },
            fallback,
            config(false),
        );

        assert_eq!(boundary.render(), "fallback");
        broken.set(false);
        assert_eq!(boundary.render(), "fallback", "no automatic retry");

        boundary.reset();
        assert_eq!(boundary.render(), "toast");
        assert!(!boundary.is_faulted());
    }

    #[test]
    fn test_external_fault_report() {
        let mut boundary =
            RecoveryBoundary::new("feed", || Ok("feed".to_string()), fallback, config(true));

        assert!(boundary.on_fault(Fault::new("loader failed")));
        assert!(!boundary.on_fault(Fault::new("second")));

        assert_eq!(boundary.render(), "fallback: loader failed");
        assert_eq!(boundary.log().len(), 1);
    }

    #[test]
    fn test_detail_hidden_outside_development() {
        let mut boundary = RecoveryBoundary::new(
            "a",
            || Err::<String, _>(Fault::new("secret")),
            fallback,
            config(false),
        );
        assert_eq!(boundary.render(), "fallback");
    }

    #[test]
    fn test_reset_when_healthy_is_noop() {
        let resets = Rc::new(Cell::new(0));
        let counter = Rc::clone(&resets);
        let mut boundary =
            RecoveryBoundary::new("a", || Ok(1), |_: &FallbackContext<'_>| 0, config(false))
                .with_on_reset(move || counter.set(counter.get() + 1));

        assert!(!boundary.reset());
        assert_eq!(resets.get(), 0);
    }

    #[test]
    fn test_hooks_observe_transitions() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let on_fault = Rc::clone(&events);
        let on_reset = Rc::clone(&events);
        let mut boundary = RecoveryBoundary::with_default_fallback(
            "accordion",
            || Err::<Vec<u8>, _>(Fault::new("bad")),
            config(false),
        )
        .with_on_fault(move |f| on_fault.borrow_mut().push(format!("fault:{f}")))
        .with_on_reset(move || on_reset.borrow_mut().push("reset".to_string()));

        assert!(boundary.render().is_empty());
        boundary.reset();
        assert_eq!(*events.borrow(), vec!["fault:bad".to_string(), "reset".to_string()]);
    }

    #[test]
    fn test_render_catching_converts_panic() {
        let mut boundary = RecoveryBoundary::new(
            "chip",
            || -> Result<String, Fault> { panic!("chip overflow") },
            fallback,
            config(true),
        );

        assert_eq!(boundary.render_catching(), "fallback: chip overflow");
        assert_eq!(boundary.fault().and_then(Fault::trace), Some("panic"));
    }

    #[test]
    fn test_boundaries_share_log() {
        let log = FaultLog::new(8);
        let failing = |name: &'static str, message: &'static str| {
            RecoveryBoundary::new(
                name,
                move || Err::<String, _>(Fault::new(message)),
                fallback,
                config(false),
            )
            .with_log(log.clone())
        };
        let mut a = failing("a", "one");
        let mut b = failing("b", "two");

        a.render();
        b.render();

        let names: Vec<_> = log.records().into_iter().map(|r| r.boundary).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
