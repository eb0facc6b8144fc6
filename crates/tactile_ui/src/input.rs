//! Per-frame input snapshot.
//!
//! Pointer (mouse or touch) and keyboard activation state, reset at the
//! start of every frame.

/// Pointer button. Touch input maps to `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button or a single touch.
    Primary,
    /// Right mouse button or long press.
    Secondary,
}

/// Keys that activate controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Space bar.
    Space,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Escape key.
    Escape,
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer X position.
    pub pointer_x: f32,
    /// Current pointer Y position.
    pub pointer_y: f32,
    /// Buttons pressed this frame.
    buttons_pressed: u8,
    /// Buttons currently held.
    buttons_down: u8,
    /// Keys pressed this frame.
    keys_pressed: Vec<Key>,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.buttons_pressed = 0;
        self.keys_pressed.clear();
    }

    /// Updates the pointer position.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    /// Records a button press.
    pub fn button_down(&mut self, button: PointerButton) {
        let mask = Self::button_mask(button);
        self.buttons_pressed |= mask;
        self.buttons_down |= mask;
    }

    /// Records a button release.
    pub fn button_up(&mut self, button: PointerButton) {
        self.buttons_down &= !Self::button_mask(button);
    }

    /// Records a complete tap at `(x, y)`.
    pub fn tap(&mut self, x: f32, y: f32) {
        self.set_pointer(x, y);
        self.button_down(PointerButton::Primary);
        self.button_up(PointerButton::Primary);
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_pressed.contains(&key) {
            self.keys_pressed.push(key);
        }
    }

    /// Returns true if the button was pressed this frame.
    #[must_use]
    pub fn clicked(&self, button: PointerButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    /// Returns true if the button is currently held.
    #[must_use]
    pub fn is_down(&self, button: PointerButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns the bit mask for a button.
    const fn button_mask(button: PointerButton) -> u8 {
        match button {
            PointerButton::Primary => 1,
            PointerButton::Secondary => 2,
        }
    }
}
