//! Default fallback view shown by a faulted [`RecoveryBoundary`].

use crate::boundary::{FallbackContext, RecoveryBoundary};
use crate::input::InputState;
use crate::layout::Rect;
use crate::render::RenderCommand;
use crate::style::Theme;

use super::core::{Widget, WidgetId, WidgetResponse, WidgetState};

const PADDING: f32 = 16.0;
const BUTTON_WIDTH: f32 = 120.0;
const BUTTON_HEIGHT: f32 = 40.0;

/// Fallback panel with a "Try again" button.
///
/// The fault detail is only ever shown when the boundary runs in a
/// development configuration.
#[derive(Debug, Clone)]
pub struct FallbackView {
    state: WidgetState,
    theme: Theme,
    detail: Option<String>,
}

impl FallbackView {
    /// Headline text.
    pub const HEADLINE: &'static str = "Something went wrong";
    /// Retry button label.
    pub const RETRY_LABEL: &'static str = "Try again";

    /// Creates a fallback view without fault detail.
    #[must_use]
    pub fn new(id: WidgetId, rect: Rect) -> Self {
        Self {
            state: WidgetState::new(id, rect),
            theme: Theme::default(),
            detail: None,
        }
    }

    /// Creates a fallback view for a boundary's fallback context.
    #[must_use]
    pub fn from_context(id: WidgetId, rect: Rect, ctx: &FallbackContext<'_>) -> Self {
        let mut view = Self::new(id, rect);
        view.detail = ctx.detail().map(|fault| match fault.trace() {
            Some(trace) => format!("{fault} ({trace})"),
            None => fault.to_string(),
        });
        view
    }

    /// Sets the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a boundary fallback function that renders this view.
    pub fn renderer(
        id: WidgetId,
        rect: Rect,
        theme: Theme,
    ) -> impl Fn(&FallbackContext<'_>) -> Vec<RenderCommand> + 'static {
        move |ctx: &FallbackContext<'_>| {
            let mut commands = Vec::new();
            Self::from_context(id, rect, ctx)
                .with_theme(theme.clone())
                .render(&mut commands);
            commands
        }
    }

    /// Returns the fault detail, if shown.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the retry button rectangle.
    #[must_use]
    pub fn retry_rect(&self) -> Rect {
        let inner = self.state.rect.shrink(PADDING);
        let width = BUTTON_WIDTH.min(inner.width);
        let height = BUTTON_HEIGHT.min(inner.height);
        Rect::new(inner.x, inner.bottom() - height, width, height)
    }

    /// Returns true if `(x, y)` hits the retry button.
    #[must_use]
    pub fn retry_hit(&self, x: f32, y: f32) -> bool {
        self.retry_rect().contains(x, y)
    }

    /// Handles this frame's input and resets `boundary` when the user
    /// asks to try again.
    ///
    /// Returns true if the boundary was reset.
    pub fn retry<T>(&mut self, input: &InputState, boundary: &mut RecoveryBoundary<T>) -> bool {
        self.update(input).clicked && boundary.reset()
    }
}

impl Widget for FallbackView {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        if !self.state.is_interactive() {
            return WidgetResponse::default();
        }

        let button = self.retry_rect();
        let tapped = self.state.track_pointer(input, button);
        WidgetResponse {
            clicked: tapped || self.state.key_activated(input),
            changed: false,
        }
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        let theme = &self.theme;
        let panel = self.state.rect;

        commands.push(RenderCommand::Rect {
            bounds: panel,
            color: theme.surface,
            corner_radius: theme.corner_radius,
        });
        commands.push(RenderCommand::RectOutline {
            bounds: panel,
            color: theme.border,
            width: 1.0,
            corner_radius: theme.corner_radius,
        });

        let inner = panel.shrink(PADDING);
        let (headline, rest) = inner.split_top(theme.font_size * 1.5);
        commands.push(RenderCommand::Text {
            text: Self::HEADLINE.to_string(),
            x: headline.x,
            y: headline.y,
            color: theme.error,
            font_size: theme.font_size,
        });

        if let Some(detail) = &self.detail {
            commands.push(RenderCommand::Text {
                text: detail.clone(),
                x: rest.x,
                y: rest.y,
                color: theme.text_muted,
                font_size: theme.font_size * 0.875,
            });
        }

        let button = self.retry_rect();
        let fill = if self.state.is_pressed() {
            theme.primary.lerp(theme.text, 0.2)
        } else {
            theme.primary
        };
        commands.push(RenderCommand::Rect {
            bounds: button,
            color: fill,
            corner_radius: theme.corner_radius,
        });
        if self.state.is_focused() {
            commands.push(RenderCommand::RectOutline {
                bounds: button,
                color: theme.text,
                width: 2.0,
                corner_radius: theme.corner_radius,
            });
        }

        let (_, center_y) = button.center();
        commands.push(RenderCommand::Text {
            text: Self::RETRY_LABEL.to_string(),
            x: button.x + PADDING,
            y: center_y - theme.font_size * 0.5,
            color: theme.knob,
            font_size: theme.font_size,
        });
    }

    fn min_size(&self) -> (f32, f32) {
        (BUTTON_WIDTH + PADDING * 2.0, BUTTON_HEIGHT + PADDING * 3.0 + 24.0)
    }
}
