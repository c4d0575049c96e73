// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wheel odometry from encoder count deltas.

use crate::config::MICROMETERS_PER_METER;

/// Measured speeds for one control tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelSpeeds {
    /// m/s, positive forward
    pub linear: f32,
    /// rad/s, positive turning right
    pub angular: f32,
}

pub struct WheelOdometry {
    meters_per_count: f32,
    wheel_base: f32,
    left_counts: i32,
    right_counts: i32,
}

impl WheelOdometry {
    /// `meters_per_count` is wheel travel per encoder count, `wheel_base` the distance between the
    /// wheels (m).
    pub const fn new(meters_per_count: f32, wheel_base: f32) -> Self {
        Self {
            meters_per_count,
            wheel_base,
            left_counts: 0,
            right_counts: 0,
        }
    }

    /// Integrate one tick of encoder deltas taken `dt` seconds apart.
    pub fn update(&mut self, left_delta: i32, right_delta: i32, dt: f32) -> WheelSpeeds {
        self.left_counts = self.left_counts.wrapping_add(left_delta);
        self.right_counts = self.right_counts.wrapping_add(right_delta);

        let left = left_delta as f32 * self.meters_per_count / dt;
        let right = right_delta as f32 * self.meters_per_count / dt;
        WheelSpeeds {
            linear: (left + right) / 2.0,
            angular: (left - right) / self.wheel_base,
        }
    }

    /// Average travelled distance of both wheels (µm).
    pub fn position_um(&self) -> i32 {
        let counts = (self.left_counts as i64 + self.right_counts as i64) as f32 / 2.0;
        let um_per_count = self.meters_per_count * MICROMETERS_PER_METER;
        (counts * um_per_count) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn straight_motion() {
        let mut odom = WheelOdometry::new(1e-5, 0.08);
        let speeds = odom.update(50, 50, 0.001);
        assert_abs_diff_eq!(speeds.linear, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(speeds.angular, 0.0, epsilon = 1e-6);
        assert_eq!(odom.position_um(), 500);
    }

    #[test]
    fn spinning_right_keeps_position() {
        let mut odom = WheelOdometry::new(1e-5, 0.08);
        let speeds = odom.update(8, -8, 0.001);
        assert_abs_diff_eq!(speeds.linear, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(speeds.angular, 2.0, epsilon = 1e-4);
        assert_eq!(odom.position_um(), 0);
    }

    #[test]
    fn position_accumulates_across_ticks() {
        let mut odom = WheelOdometry::new(1e-5, 0.08);
        for _ in 0..1000 {
            odom.update(18, 18, 0.001);
        }
        assert_abs_diff_eq!(odom.position_um() as f32, 180_000.0, epsilon = 2.0);
    }
}
