//! Core widget types and traits.

use crate::input::InputState;
use crate::layout::Rect;
use crate::render::RenderCommand;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Widget state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Widget is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Widget is enabled (can receive input).
    pub const ENABLED: u32 = 1 << 1;
    /// Widget has keyboard focus.
    pub const FOCUSED: u32 = 1 << 2;
    /// Pointer is over the widget.
    pub const HOVERED: u32 = 1 << 3;
    /// Pointer is held down on the widget.
    pub const PRESSED: u32 = 1 << 4;

    /// Default flags for a new widget.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Common widget state.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Bounding rectangle.
    pub rect: Rect,
    /// State flags.
    pub flags: WidgetFlags,
}

impl WidgetState {
    /// Creates a new widget state.
    #[must_use]
    pub fn new(id: WidgetId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            flags: WidgetFlags::DEFAULT,
        }
    }

    /// Returns true if the widget can receive input.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.flags.has(WidgetFlags::VISIBLE) && self.flags.has(WidgetFlags::ENABLED)
    }

    /// Returns true if the widget has keyboard focus.
    #[inline]
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.flags.has(WidgetFlags::FOCUSED)
    }

    /// Returns true if the pointer is over the widget.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.has(WidgetFlags::HOVERED)
    }

    /// Returns true if the pointer is held down on the widget.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.flags.has(WidgetFlags::PRESSED)
    }

    /// Gives or removes keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.flags.assign(WidgetFlags::FOCUSED, focused);
    }

    /// Enables or disables input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.assign(WidgetFlags::ENABLED, enabled);
    }

    /// Refreshes hover/press flags from the pointer.
    ///
    /// Returns true if the primary button went down inside `hit` this frame.
    pub(crate) fn track_pointer(&mut self, input: &InputState, hit: Rect) -> bool {
        use crate::input::PointerButton;

        let inside = hit.contains(input.pointer_x, input.pointer_y);
        self.flags.assign(WidgetFlags::HOVERED, inside);
        self.flags.assign(
            WidgetFlags::PRESSED,
            inside && input.is_down(PointerButton::Primary),
        );
        inside && input.clicked(PointerButton::Primary)
    }

    /// Returns true if an activation key was pressed while focused.
    pub(crate) fn key_activated(&self, input: &InputState) -> bool {
        use crate::input::Key;

        self.is_focused() && (input.key_pressed(Key::Space) || input.key_pressed(Key::Enter))
    }
}

/// Response from widget update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// Widget was activated (tap or key).
    pub clicked: bool,
    /// Widget value changed.
    pub changed: bool,
}

/// Base trait for the built-in controls.
pub trait Widget {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Handles this frame's input.
    fn update(&mut self, input: &InputState) -> WidgetResponse;

    /// Appends render commands for this widget.
    fn render(&self, commands: &mut Vec<RenderCommand>);

    /// Returns the minimum size of this widget.
    fn min_size(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}
