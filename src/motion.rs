//! Scroll offset and velocity.
//!
//! Velocity eases toward its target with an exponential approach, so pausing
//! and resuming never jerk. The offset is kept inside one unit width; the
//! track repeats every unit, so the wrap is invisible.

use crate::config::LoopConfig;

/// Euclidean remainder of `value` by `modulus`, always in `[0, modulus)`.
///
/// `modulus` must be positive and finite.
pub fn wrap_offset(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    // rem_euclid can round up to `modulus` for tiny negative inputs.
    if wrapped >= modulus {
        0.0
    } else {
        wrapped
    }
}

/// Fraction of the remaining gap to the target closed over `dt` seconds.
fn easing(dt: f64, tau: f64) -> f64 {
    if tau <= 0.0 {
        1.0
    } else {
        1.0 - (-dt / tau).exp()
    }
}

#[derive(Debug, Clone)]
pub struct MotionController {
    offset: f64,
    velocity: f64,
    speed: f64,
    tau: f64,
    unit_width: f64,
}

impl MotionController {
    pub fn new(config: &LoopConfig) -> Self {
        let config = config.sanitized();
        Self {
            offset: 0.0,
            velocity: 0.0,
            speed: config.speed,
            tau: config.smoothing_time_constant,
            unit_width: 0.0,
        }
    }

    /// Sets the wrap modulus and folds the current offset into it.
    pub fn set_unit_width(&mut self, unit_width: f64) {
        if !(unit_width.is_finite() && unit_width > 0.0) {
            return;
        }
        self.unit_width = unit_width;
        self.offset = wrap_offset(self.offset, unit_width);
    }

    /// Drops the wrap modulus. The offset holds still until the next
    /// `set_unit_width`; velocity keeps easing.
    pub fn clear_unit_width(&mut self) {
        self.unit_width = 0.0;
    }

    /// Advances one tick and returns the new offset.
    ///
    /// Velocity is eased even while the unit is unmeasured so a loop that
    /// appears mid-resume picks up at the right speed.
    pub fn advance(&mut self, dt: f64, is_paused: bool) -> f64 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let target = if is_paused { 0.0 } else { self.speed };
        self.velocity += (target - self.velocity) * easing(dt, self.tau);

        if self.unit_width > 0.0 {
            self.offset = wrap_offset(self.offset + self.velocity * dt, self.unit_width);
        }
        self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    /// Horizontal translation for the whole track.
    pub fn translation(&self) -> f64 {
        -self.offset
    }
}
