//! Per-instance marquee configuration.

/// Nominal scroll speed in pixels per second.
pub const DEFAULT_SPEED: f64 = 80.0;
/// Smoothing time constant τ in seconds.
pub const DEFAULT_SMOOTHING_TIME_CONSTANT: f64 = 0.25;

/// Options supplied when a loop is constructed. Every field has a default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Pixels per second. Negative values scroll the track to the right.
    pub speed: f64,
    /// Whether the hover signal pauses the loop.
    pub pause_on_hover: bool,
    /// Seconds for the velocity to close ~63% of the gap to its target.
    /// Zero snaps straight to the target.
    pub smoothing_time_constant: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            pause_on_hover: true,
            smoothing_time_constant: DEFAULT_SMOOTHING_TIME_CONSTANT,
        }
    }
}

impl LoopConfig {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = pause_on_hover;
        self
    }

    pub fn with_smoothing_time_constant(mut self, tau: f64) -> Self {
        self.smoothing_time_constant = tau;
        self
    }

    /// Replaces values the motion model cannot use with their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let speed = if self.speed.is_finite() {
            self.speed
        } else {
            DEFAULT_SPEED
        };
        let tau = if self.smoothing_time_constant.is_finite() && self.smoothing_time_constant >= 0.0
        {
            self.smoothing_time_constant
        } else {
            DEFAULT_SMOOTHING_TIME_CONSTANT
        };
        Self {
            speed,
            pause_on_hover: self.pause_on_hover,
            smoothing_time_constant: tau,
        }
    }
}
