//! Colors and theme for interactive controls.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Palette shared by the built-in controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Surface color (cards, panels).
    pub surface: Color,
    /// Primary accent, used for the ON track.
    pub primary: Color,
    /// Track color while OFF.
    pub track_off: Color,
    /// Switch knob color.
    pub knob: Color,
    /// Text color.
    pub text: Color,
    /// Muted text color.
    pub text_muted: Color,
    /// Border color.
    pub border: Color,
    /// Error color.
    pub error: Color,
    /// Corner radius for panels and buttons.
    pub corner_radius: f32,
    /// Base font size.
    pub font_size: f32,
}

impl Theme {
    /// Light theme.
    pub const LIGHT: Self = Self {
        surface: Color::rgb(0.98, 0.98, 0.99),
        primary: Color::rgb(0.20, 0.47, 0.96),
        track_off: Color::rgb(0.80, 0.81, 0.84),
        knob: Color::WHITE,
        text: Color::rgb(0.10, 0.11, 0.13),
        text_muted: Color::rgb(0.45, 0.47, 0.51),
        border: Color::rgb(0.86, 0.87, 0.89),
        error: Color::rgb(0.85, 0.20, 0.22),
        corner_radius: 8.0,
        font_size: 16.0,
    };

    /// Dark theme.
    pub const DARK: Self = Self {
        surface: Color::rgb(0.09, 0.10, 0.12),
        primary: Color::rgb(0.36, 0.58, 1.0),
        track_off: Color::rgb(0.28, 0.29, 0.33),
        knob: Color::rgb(0.95, 0.95, 0.97),
        text: Color::rgb(0.92, 0.93, 0.95),
        text_muted: Color::rgb(0.58, 0.60, 0.64),
        border: Color::rgb(0.20, 0.21, 0.24),
        error: Color::rgb(1.0, 0.36, 0.36),
        corner_radius: 8.0,
        font_size: 16.0,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::LIGHT
    }
}
