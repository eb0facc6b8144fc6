//! # Tactile UI
//!
//! Interaction primitives for touch-first interfaces:
//! - Debounce/throttle gates that rate-limit user-triggered actions
//! - An animated two-state toggle whose transitions can be interrupted
//! - A recovery boundary that swaps a failing subtree for a fallback view
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    INTERACTION PIPELINE                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  InputState → Widget::update → Gate / Toggle / Boundary  │
//! │                                    ↓                      │
//! │          TimerQueue::run_due ← deferred work              │
//! │                                    ↓                      │
//! │              Widget::render → RenderCommand list          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one logical UI thread. Time comes from the
//! [`TimerQueue`](tactile_core::TimerQueue) the host pumps each frame, so
//! tests drive the whole stack with a manual clock.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use tactile_core::{ManualClock, TimerQueue};
//! use tactile_ui::Gate;
//!
//! let clock = Rc::new(ManualClock::new());
//! let timers = TimerQueue::new(clock.clone());
//!
//! let saves = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&saves);
//! let mut save = Gate::debounce(
//!     move |_: ()| counter.set(counter.get() + 1),
//!     Duration::from_millis(300),
//!     &timers,
//! );
//!
//! save.trigger(());
//! save.trigger(());
//! clock.advance(Duration::from_millis(300));
//! timers.run_due();
//! assert_eq!(saves.get(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod boundary;
pub mod config;
pub mod error;
pub mod gate;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;
pub mod toggle;
pub mod widget;

pub use animation::{Animation, Easing};
pub use boundary::{
    BoundaryState, FallbackContext, Fault, FaultLog, FaultRecord, RecoveryBoundary,
};
pub use config::{BoundaryConfig, GateConfig, InteractionConfig, ToggleConfig};
pub use error::{ConfigError, ConfigResult};
pub use gate::{Gate, GateMode, GateOutcome};
pub use input::{InputState, Key, PointerButton};
pub use layout::Rect;
pub use render::RenderCommand;
pub use style::{Color, Theme};
pub use toggle::{Toggle, ToggleState};
pub use widget::{FallbackView, Switch, Widget, WidgetId, WidgetResponse};
