//! On/off switch control backed by a [`Toggle`].

use crate::input::InputState;
use crate::layout::Rect;
use crate::render::RenderCommand;
use crate::style::Theme;
use crate::toggle::Toggle;

use super::core::{Widget, WidgetId, WidgetResponse, WidgetState};

/// Gap between the track edge and the knob.
const KNOB_INSET: f32 = 2.0;
/// Gap between the track and its label.
const LABEL_GAP: f32 = 8.0;

/// Switch control.
///
/// A tap inside the track, or Space/Enter while focused, flips the
/// underlying toggle. The knob position and track color follow the
/// toggle's transition value, so an interrupted flip reverses smoothly.
#[derive(Debug)]
pub struct Switch {
    state: WidgetState,
    toggle: Toggle,
    theme: Theme,
    label: Option<String>,
}

impl Switch {
    /// Creates a switch occupying `rect`.
    #[must_use]
    pub fn new(id: WidgetId, rect: Rect, toggle: Toggle) -> Self {
        Self {
            state: WidgetState::new(id, rect),
            toggle,
            theme: Theme::default(),
            label: None,
        }
    }

    /// Sets the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets a label drawn to the right of the track.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the underlying toggle.
    #[must_use]
    pub fn toggle(&self) -> &Toggle {
        &self.toggle
    }

    /// Returns the knob rectangle at transition value `t`.
    #[must_use]
    pub fn knob_rect(&self, t: f32) -> Rect {
        let track = self.state.rect;
        let diameter = (track.height - KNOB_INSET * 2.0).max(0.0);
        let travel = (track.width - diameter - KNOB_INSET * 2.0).max(0.0);
        Rect::new(
            track.x + KNOB_INSET + travel * t.clamp(0.0, 1.0),
            track.y + KNOB_INSET,
            diameter,
            diameter,
        )
    }
}

impl Widget for Switch {
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

        let tapped = self.state.track_pointer(input, self.state.rect);
        let clicked = tapped || self.state.key_activated(input);
        if !clicked {
            return WidgetResponse::default();
        }

        WidgetResponse {
            clicked,
            changed: self.toggle.toggle(),
        }
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        let t = self.toggle.transition_value();
        let track = self.state.rect;
        let radius = track.height * 0.5;

        commands.push(RenderCommand::Rect {
            bounds: track,
            color: self.theme.track_off.lerp(self.theme.primary, t),
            corner_radius: radius,
        });

        let knob = self.knob_rect(t);
        commands.push(RenderCommand::Rect {
            bounds: knob,
            color: self.theme.knob,
            corner_radius: knob.height * 0.5,
        });

        if self.state.is_focused() {
            commands.push(RenderCommand::RectOutline {
                bounds: track,
                color: self.theme.primary,
                width: 2.0,
                corner_radius: radius,
            });
        }

        if let Some(label) = &self.label {
            let (_, center_y) = track.center();
            commands.push(RenderCommand::Text {
                text: label.clone(),
                x: track.right() + LABEL_GAP,
                y: center_y - self.theme.font_size * 0.5,
                color: self.theme.text,
                font_size: self.theme.font_size,
            });
        }
    }

    fn min_size(&self) -> (f32, f32) {
        (44.0, 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::config::ToggleConfig;
    use crate::input::Key;
    use std::rc::Rc;
    use std::time::Duration;
    use tactile_core::{ManualClock, TimerQueue};

    fn setup() -> (Rc<ManualClock>, TimerQueue, Switch) {
        let clock = Rc::new(ManualClock::new());
        let timers = TimerQueue::new(clock.clone());
        let config = ToggleConfig {
            duration_ms: 200,
            easing: Easing::Linear,
            frame_interval_ms: 16,
        };
        let toggle = Toggle::new(false, &config, &timers);
        let switch = Switch::new(WidgetId::new(7), Rect::new(0.0, 0.0, 48.0, 24.0), toggle);
        (clock, timers, switch)
    }

    #[test]
    fn test_tap_flips() {
        let (_clock, _timers, mut switch) = setup();
        let mut input = InputState::new();

        input.tap(10.0, 10.0);
        let response = switch.update(&input);
        assert!(response.clicked);
        assert!(response.changed);
        assert!(switch.toggle().is_on());
    }

    #[test]
    fn test_tap_outside_ignored() {
        let (_clock, _timers, mut switch) = setup();
        let mut input = InputState::new();

        input.tap(100.0, 10.0);
        assert_eq!(switch.update(&input), WidgetResponse::default());
        assert!(!switch.toggle().is_on());
    }

    #[test]
    fn test_key_requires_focus() {
        let (_clock, _timers, mut switch) = setup();
        let mut input = InputState::new();
        input.set_pointer(-1.0, -1.0);
        input.key_down(Key::Space);

        assert!(!switch.update(&input).clicked);

        switch.state_mut().set_focused(true);
        assert!(switch.update(&input).changed);
        assert!(switch.toggle().is_on());
    }

    #[test]
    fn test_disabled_switch_ignores_input() {
        let (_clock, _timers, mut switch) = setup();
        switch.state_mut().set_enabled(false);

        let mut input = InputState::new();
        input.tap(10.0, 10.0);
        assert!(!switch.update(&input).clicked);
    }

    #[test]
    fn test_knob_follows_transition() {
        let (clock, timers, mut switch) = setup();

        let mut commands = Vec::new();
        switch.render(&mut commands);
        let RenderCommand::Rect { bounds: start, .. } = commands[1] else {
            panic!("expected knob rect");
        };
        assert!((start.x - KNOB_INSET).abs() < 1e-4);

        let mut input = InputState::new();
        input.tap(10.0, 10.0);
        switch.update(&input);

        clock.advance(Duration::from_millis(100));
        timers.run_due();

        commands.clear();
        switch.render(&mut commands);
        let RenderCommand::Rect { bounds: mid, .. } = commands[1] else {
            panic!("expected knob rect");
        };
        // travel = 48 - 20 - 4 = 24, half way
        assert!((mid.x - (KNOB_INSET + 12.0)).abs() < 0.1);
    }

    #[test]
    fn test_label_and_focus_ring() {
        let (_clock, _timers, switch) = setup();
        let mut switch = switch.with_label("Wi-Fi");
        switch.state_mut().set_focused(true);

        let mut commands = Vec::new();
        switch.render(&mut commands);

        assert!(commands.iter().any(|c| matches!(c, RenderCommand::RectOutline { .. })));
        assert!(commands.iter().any(|c| c.text() == Some("Wi-Fi")));
    }
}
