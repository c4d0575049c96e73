// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Distance model for the infrared sensors.
//!
//! Each phototransistor follows `distance = A / ln(on - off) - B` where `off` is the ambient reading
//! and `on` the reading under illumination. Distances are measured from the robot center, in
//! meters.

use crate::sensors::{Sensor, SensorSample};

#[allow(unused_imports)]
use micromath::F32Ext;

/// Stored in place of a distance when the sensor saw no reflected light.
///
/// Reads as "infinitely far": it never reports a wall and never feeds a corridor error.
pub const NO_READING: f32 = f32::INFINITY;

/// Response curve constants of one sensor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Calibration {
    pub a: f32,
    pub b: f32,
}

/// Response curves indexed by [`Sensor::index`].
pub const SENSOR_CALIBRATION: [Calibration; Sensor::COUNT] = [
    // Side left
    Calibration { a: 2.806, b: 0.287 },
    // Side right
    Calibration { a: 2.327, b: 0.231 },
    // Front left
    Calibration { a: 2.105, b: 0.175 },
    // Front right
    Calibration { a: 2.240, b: 0.192 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadingError {
    /// Illuminated reading not above the ambient one; the logarithm is undefined.
    NoReflection,
}

/// Convert one raw sample pair into a distance.
pub fn distance_from_samples(
    sample: SensorSample,
    calibration: Calibration,
) -> Result<f32, ReadingError> {
    if sample.on <= sample.off {
        return Err(ReadingError::NoReflection);
    }
    let reflected = (sample.on - sample.off) as f32;
    Ok(calibration.a / reflected.ln() - calibration.b)
}

/// Snapshot of all four sensor distances (m).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Distances {
    pub side_left: f32,
    pub side_right: f32,
    pub front_left: f32,
    pub front_right: f32,
}

impl Distances {
    pub const fn uniform(distance: f32) -> Self {
        Self {
            side_left: distance,
            side_right: distance,
            front_left: distance,
            front_right: distance,
        }
    }

    /// Lateral offset from the corridor center.
    ///
    /// Only the side that is closer than `middle` is trusted. The result is zero when both sides
    /// are on the same side of `middle`.
    pub fn side_error(&self, middle: f32) -> f32 {
        if self.side_left > middle && self.side_right < middle {
            self.side_right - middle
        } else if self.side_right > middle && self.side_left < middle {
            middle - self.side_left
        } else {
            0.0
        }
    }

    /// Skew between the front sensors while facing a perpendicular wall.
    ///
    /// Zero unless both front sensors have a reading.
    #[inline]
    pub fn front_error(&self) -> f32 {
        if self.front_left.is_finite() && self.front_right.is_finite() {
            self.front_left - self.front_right
        } else {
            0.0
        }
    }

    #[inline]
    pub fn front_wall_distance(&self) -> f32 {
        (self.front_left + self.front_right) / 2.0
    }
}
