// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PID on a speed error for the wheel loops.
//!
//! Works in `no_std` and does not allocate memory. The error is passed in rather than computed
//! from a setpoint so that wall-following corrections can be added to it before the update.

/// PID controller with tunable gains and output clamping.
pub struct Pid {
    /// Proportional gain
    kp: f32,
    /// Integral gain
    ki: f32,
    /// Derivative gain
    kd: f32,

    /// Integrator state
    integral: f32,
    /// Last error (for derivative term)
    prev_error: f32,

    /// Output clamp
    out_min: f32,
    out_max: f32,

    /// Integral anti-windup clamp
    int_min: f32,
    int_max: f32,

    first_update: bool,
}

impl Pid {
    /// Create a new PID controller.
    ///
    /// `kp`, `ki`, `kd` are the gain constants.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,

            integral: 0.0,
            prev_error: 0.0,

            out_min: -1.0,
            out_max: 1.0,

            int_min: -1.0,
            int_max: 1.0,

            first_update: true,
        }
    }

    /// Set output limits.
    pub fn with_output_limits(mut self, min: f32, max: f32) -> Self {
        self.out_min = min;
        self.out_max = max;
        self
    }

    /// Set integral limits for anti-windup.
    pub fn with_integral_limits(mut self, min: f32, max: f32) -> Self {
        self.int_min = min;
        self.int_max = max;
        self
    }

    /// Accumulated integral term.
    #[inline]
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// Drop the accumulated error and derivative history.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.first_update = true;
    }

    /// Run one update on `error` (target minus measured) over `dt` seconds.
    ///
    /// Returns a command clamped to [`out_min`, `out_max`].
    pub fn update(&mut self, error: f32, dt: f32) -> f32 {
        let p = self.kp * error;

        self.integral = (self.integral + error * dt * self.ki).clamp(self.int_min, self.int_max);
        let i = self.integral;

        let d = if self.first_update {
            self.first_update = false;
            0.0
        } else {
            self.kd * (error - self.prev_error) / dt
        };
        self.prev_error = error;

        (p + i + d).clamp(self.out_min, self.out_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn proportional_only() {
        let mut pid = Pid::new(2.0, 0.0, 0.0).with_output_limits(-10.0, 10.0);
        assert_abs_diff_eq!(pid.update(0.5, 0.001), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pid.update(-0.25, 0.001), -0.5, epsilon = 1e-6);
    }

    #[test]
    fn integral_accumulates_and_clamps() {
        let mut pid = Pid::new(0.0, 100.0, 0.0).with_integral_limits(-0.5, 0.5);
        pid.update(1.0, 0.001);
        assert_abs_diff_eq!(pid.integral(), 0.1, epsilon = 1e-6);
        for _ in 0..10 {
            pid.update(1.0, 0.001);
        }
        assert_eq!(pid.integral(), 0.5);
    }

    #[test]
    fn derivative_skips_first_update() {
        let mut pid = Pid::new(0.0, 0.0, 0.01).with_output_limits(-100.0, 100.0);
        assert_eq!(pid.update(1.0, 0.01), 0.0);
        assert_abs_diff_eq!(pid.update(2.0, 0.01), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn output_is_clamped() {
        let mut pid = Pid::new(100.0, 0.0, 0.0);
        assert_eq!(pid.update(1.0, 0.001), 1.0);
        assert_eq!(pid.update(-1.0, 0.001), -1.0);
    }

    #[test]
    fn reset_clears_history() {
        let mut pid = Pid::new(0.0, 100.0, 0.01).with_output_limits(-100.0, 100.0);
        pid.update(1.0, 0.001);
        pid.update(3.0, 0.001);
        pid.reset();
        assert_eq!(pid.integral(), 0.0);
        // No derivative kick after a reset.
        assert_abs_diff_eq!(pid.update(0.0, 0.001), 0.0, epsilon = 1e-6);
    }
}
