// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-place 90° turns.
//!
//! Open loop in time: a fixed angular speed for a fixed number of ticks, then zero angular speed
//! while the angular loop settles. Speed and durations are calibrated together for 90°.

use core::f32::consts::PI;

use crate::motion::Motion;
use crate::platform::{wait_ticks, Platform};

/// Angular speed magnitude while turning (rad/s).
pub const TURN_ANGULAR_SPEED: f32 = 8.0 * PI;

/// Ticks spent commanding [`TURN_ANGULAR_SPEED`].
pub const TURN_ROTATION_TICKS: u32 = 88;

/// Ticks from turn start until control is handed back.
pub const TURN_TOTAL_TICKS: u32 = 176;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Signed angular speed; left is negative.
    #[inline]
    pub fn angular_speed(self) -> f32 {
        match self {
            Turn::Left => -TURN_ANGULAR_SPEED,
            Turn::Right => TURN_ANGULAR_SPEED,
        }
    }
}

impl<'a, P: Platform> Motion<'a, P> {
    pub fn turn(&mut self, turn: Turn) {
        let start = self.platform.ticks();
        self.platform.set_target_angular_speed(turn.angular_speed());
        wait_ticks(&mut self.platform, start, TURN_ROTATION_TICKS);
        self.platform.set_target_angular_speed(0.0);
        wait_ticks(&mut self.platform, start, TURN_TOTAL_TICKS);
    }

    #[inline]
    pub fn turn_left(&mut self) {
        self.turn(Turn::Left);
    }

    #[inline]
    pub fn turn_right(&mut self) {
        self.turn(Turn::Right);
    }
}
