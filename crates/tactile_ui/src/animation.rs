//! Interruptible value animation.
//!
//! An [`Animation`] interpolates from wherever it currently sits toward a
//! target. Retargeting mid-flight starts a new segment from the current
//! value, so a reversal is continuous and never jumps to an endpoint.

use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Exponential ease-out (fast start, soft landing).
    #[default]
    ExponentialOut,
    /// Exponential ease-in (accelerating).
    ExponentialIn,
    /// Exponential ease-in-out.
    ExponentialInOut,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::Instant => 1.0,
        }
    }
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Value the current segment started from.
    start: f32,
    /// Segment progress (0-1).
    progress: f32,
    /// Duration of a unit-distance move (seconds).
    duration: f32,
    /// Duration of the current segment (seconds).
    segment: f32,
    /// Easing function.
    easing: Easing,
}

impl Animation {
    /// Default animation duration (seconds).
    pub const DEFAULT_DURATION: f32 = 0.2;

    /// Values closer than this are considered equal.
    const EPSILON: f32 = 0.0001;

    /// Creates a resting animation at the given value.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            start: value,
            progress: 1.0,
            duration: Self::DEFAULT_DURATION,
            segment: Self::DEFAULT_DURATION,
            easing,
        }
    }

    /// Sets the duration of a unit-distance move in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self.segment = self.duration;
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Sets a new target value, starting a full-duration segment from the
    /// current value.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > Self::EPSILON {
            self.begin_segment(target, self.duration);
        }
    }

    /// Sets a new target and scales the segment by the distance left.
    ///
    /// A unit-distance move takes the full duration, so reversing halfway
    /// through a 0→1 move takes half of it and the value keeps moving at the
    /// same speed in the new direction.
    pub fn retarget(&mut self, target: f32) {
        if (target - self.target).abs() <= Self::EPSILON {
            return;
        }

        let distance = (target - self.current).abs();
        self.begin_segment(target, self.duration * distance);
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Updates the animation.
    ///
    /// `dt` is delta time in seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if self.segment > 0.0 {
            self.progress += dt / self.segment;
        } else {
            self.progress = 1.0;
        }

        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete
        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }

    fn begin_segment(&mut self, target: f32, segment: f32) {
        if self.easing == Easing::Instant || segment <= 0.0 {
            self.set_immediate(target);
            return;
        }
        self.start = self.current;
        self.target = target;
        self.segment = segment;
        self.progress = 0.0;
    }
}
