// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Constant-acceleration planning.
//!
//! The commanded speed is assumed to be the actual speed. Speeding up uses the acceleration
//! magnitude, slowing down the deceleration magnitude.

/// Linear acceleration limits (m/s², both positive).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ramp {
    pub acceleration: f32,
    pub deceleration: f32,
}

impl Ramp {
    /// Signed acceleration that takes `current` to `target`.
    #[inline]
    fn toward(&self, current: f32, target: f32) -> f32 {
        if current > target {
            -self.deceleration
        } else {
            self.acceleration
        }
    }

    /// Distance travelled while changing speed from `current` to `target` (m).
    ///
    /// Uses `Δ(v²) / (2·a)`, which is positive for both speeding up and slowing down.
    pub fn distance_to_speed(&self, current: f32, target: f32) -> f32 {
        (target * target - current * current) / (2.0 * self.toward(current, target))
    }

    /// Time needed to change speed from `current` to `target` (s).
    pub fn time_to_speed(&self, current: f32, target: f32) -> f32 {
        (target - current) / self.toward(current, target)
    }

    /// [`time_to_speed`](Self::time_to_speed) quantized down to whole control ticks.
    pub fn ticks_to_speed(&self, current: f32, target: f32, tick_hz: f32) -> u32 {
        (self.time_to_speed(current, target) * tick_hz) as u32
    }
}
