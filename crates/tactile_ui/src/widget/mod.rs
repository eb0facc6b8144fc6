//! Built-in controls.
//!
//! Widgets read an [`InputState`](crate::input::InputState) once per frame
//! and append [`RenderCommand`](crate::render::RenderCommand)s; they never
//! draw directly.

mod core;
mod fallback;
mod switch;

pub use self::core::{Widget, WidgetFlags, WidgetId, WidgetResponse, WidgetState};
pub use self::fallback::FallbackView;
pub use self::switch::Switch;
