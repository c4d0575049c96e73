// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Side-sensor offset calibration.
//!
//! Place the robot centered in a corridor with both side walls present, then run
//! [`calibrate_side_sensors`]. Corrections accumulate onto the existing factors, so running it again
//! refines the previous result. Nothing is persisted across resets.

use log::{info, warn};

use crate::platform::{sleep_ticks, Clock};
use crate::sensors::{Sensor, SensorBank};

/// Readings averaged per side.
pub const SIDE_CALIBRATION_READINGS: u32 = 20;

/// Ticks slept between readings so the distances refresh.
pub const TICKS_BETWEEN_READINGS: u32 = 4;

/// Correction added to each side factor by one calibration run (m).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SideCorrection {
    pub left: f32,
    pub right: f32,
}

#[derive(Copy, Clone, Default)]
struct Mean {
    sum: f32,
    count: u32,
}

impl Mean {
    /// Missing readings are skipped.
    fn push(&mut self, value: f32) {
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f32> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f32)
        }
    }
}

/// Average the side distances and add their deviation from the nominal corridor distance to the
/// side calibration factors.
///
/// Blocks the caller for the whole sampling period. Distances must keep being refreshed by the
/// control tick meanwhile.
pub fn calibrate_side_sensors<C: Clock + ?Sized>(bank: &SensorBank, clock: &mut C) -> SideCorrection {
    let middle = bank.config().middle_maze_distance;
    let mut left = Mean::default();
    let mut right = Mean::default();

    for _ in 0..SIDE_CALIBRATION_READINGS {
        left.push(bank.distance(Sensor::SideLeft));
        right.push(bank.distance(Sensor::SideRight));
        sleep_ticks(clock, TICKS_BETWEEN_READINGS);
    }

    let correction = SideCorrection {
        left: apply(bank, Sensor::SideLeft, left, middle),
        right: apply(bank, Sensor::SideRight, right, middle),
    };
    info!(
        "side calibration: left {} m, right {} m",
        bank.calibration_factor(Sensor::SideLeft),
        bank.calibration_factor(Sensor::SideRight)
    );
    correction
}

fn apply(bank: &SensorBank, sensor: Sensor, mean: Mean, middle: f32) -> f32 {
    match mean.value() {
        Some(average) => {
            let delta = average - middle;
            bank.add_calibration_factor(sensor, delta);
            delta
        }
        None => {
            warn!("side calibration: no reading from {:?}, factor kept", sensor);
            0.0
        }
    }
}
