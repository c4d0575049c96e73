// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Shared storage for raw samples, distances and side calibration.
//!
//! [`SensorBank`] is meant to live in a `static`. Every slot has a single writer:
//!
//! | Slot | Writer |
//! | ---- | ------ |
//! | raw off/on samples | acquisition state machine (timer interrupt) |
//! | distances | [`SensorBank::update`] (control tick) |
//! | side calibration factors | [`calibrate_side_sensors`](crate::sensors::calibrate_side_sensors) |
//!
//! Slots are independent words. Nothing requires two of them to be observed together.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::Config;
use crate::sensors::distance::{distance_from_samples, Calibration, Distances, NO_READING};
use crate::sensors::walls::{self, WallsAround};
use crate::sync::AtomicF32;

/// Sensor identities, in sampling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Sensor {
    SideLeft = 0,
    SideRight = 1,
    FrontLeft = 2,
    FrontRight = 3,
}

impl Sensor {
    pub const COUNT: usize = 4;

    pub const ALL: [Sensor; Sensor::COUNT] = [
        Sensor::SideLeft,
        Sensor::SideRight,
        Sensor::FrontLeft,
        Sensor::FrontRight,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Sensor::SideLeft),
            1 => Some(Sensor::SideRight),
            2 => Some(Sensor::FrontLeft),
            3 => Some(Sensor::FrontRight),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_side(self) -> bool {
        matches!(self, Sensor::SideLeft | Sensor::SideRight)
    }
}

/// Phototransistor readings with the emitter off (ambient) and on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SensorSample {
    pub off: u16,
    pub on: u16,
}

pub struct SensorBank {
    off: [AtomicU16; Sensor::COUNT],
    on: [AtomicU16; Sensor::COUNT],
    distance: [AtomicF32; Sensor::COUNT],
    /// Only the side entries are ever non-zero.
    calibration_factor: [AtomicF32; Sensor::COUNT],
    calibration: [Calibration; Sensor::COUNT],
    config: Config,
}

impl SensorBank {
    pub const fn new(calibration: [Calibration; Sensor::COUNT], config: Config) -> Self {
        Self {
            off: [
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
            ],
            on: [
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
            ],
            distance: [
                AtomicF32::new(NO_READING),
                AtomicF32::new(NO_READING),
                AtomicF32::new(NO_READING),
                AtomicF32::new(NO_READING),
            ],
            calibration_factor: [
                AtomicF32::new(0.0),
                AtomicF32::new(0.0),
                AtomicF32::new(0.0),
                AtomicF32::new(0.0),
            ],
            calibration,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub(crate) fn record_off(&self, sensor: Sensor, value: u16) {
        self.off[sensor.index()].store(value, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_on(&self, sensor: Sensor, value: u16) {
        self.on[sensor.index()].store(value, Ordering::Relaxed);
    }

    /// Latest raw readings of one sensor.
    pub fn sample(&self, sensor: Sensor) -> SensorSample {
        SensorSample {
            off: self.off[sensor.index()].load(Ordering::Relaxed),
            on: self.on[sensor.index()].load(Ordering::Relaxed),
        }
    }

    /// Latest raw readings of every sensor, for diagnostics.
    pub fn raw(&self) -> [SensorSample; Sensor::COUNT] {
        Sensor::ALL.map(|sensor| self.sample(sensor))
    }

    /// Recompute every distance from the latest samples.
    ///
    /// Side distances have their calibration factor subtracted. A sensor without reflected light
    /// stores [`NO_READING`].
    pub fn update(&self) {
        for sensor in Sensor::ALL {
            let i = sensor.index();
            let distance = match distance_from_samples(self.sample(sensor), self.calibration[i]) {
                Ok(d) if sensor.is_side() => d - self.calibration_factor[i].load(),
                Ok(d) => d,
                Err(_) => NO_READING,
            };
            self.distance[i].store(distance);
        }
    }

    #[inline]
    pub fn distance(&self, sensor: Sensor) -> f32 {
        self.distance[sensor.index()].load()
    }

    pub fn distances(&self) -> Distances {
        Distances {
            side_left: self.distance(Sensor::SideLeft),
            side_right: self.distance(Sensor::SideRight),
            front_left: self.distance(Sensor::FrontLeft),
            front_right: self.distance(Sensor::FrontRight),
        }
    }

    pub fn side_error(&self) -> f32 {
        self.distances().side_error(self.config.middle_maze_distance)
    }

    pub fn front_error(&self) -> f32 {
        self.distances().front_error()
    }

    pub fn front_wall_distance(&self) -> f32 {
        self.distances().front_wall_distance()
    }

    pub fn left_wall(&self) -> bool {
        walls::side_wall(self.distance(Sensor::SideLeft), &self.config)
    }

    pub fn right_wall(&self) -> bool {
        walls::side_wall(self.distance(Sensor::SideRight), &self.config)
    }

    pub fn front_wall(&self) -> bool {
        walls::front_wall(
            self.distance(Sensor::FrontLeft),
            self.distance(Sensor::FrontRight),
            &self.config,
        )
    }

    pub fn walls(&self) -> WallsAround {
        WallsAround::detect(&self.distances(), &self.config)
    }

    #[inline]
    pub fn calibration_factor(&self, sensor: Sensor) -> f32 {
        self.calibration_factor[sensor.index()].load()
    }

    /// Accumulate a correction onto a side sensor. Front sensors are left untouched.
    pub(crate) fn add_calibration_factor(&self, sensor: Sensor, delta: f32) {
        if sensor.is_side() {
            let slot = &self.calibration_factor[sensor.index()];
            slot.store(slot.load() + delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SENSOR_CALIBRATION;

    fn bank() -> SensorBank {
        SensorBank::new(SENSOR_CALIBRATION, Config::DEFAULT)
    }

    #[test]
    fn sensor_index_round_trip_and_out_of_range() {
        for sensor in Sensor::ALL {
            assert_eq!(Sensor::from_index(sensor as u8), Some(sensor));
        }
        assert_eq!(Sensor::from_index(4), None);
        assert_eq!(Sensor::from_index(255), None);
    }

    #[test]
    fn starts_without_readings() {
        let bank = bank();
        assert!(bank.distance(Sensor::FrontLeft).is_infinite());
        assert_eq!(bank.walls(), WallsAround::default());
        assert_eq!(bank.raw(), [SensorSample::default(); Sensor::COUNT]);
    }

    #[test]
    fn update_applies_model_to_every_sensor() {
        let bank = bank();
        for sensor in Sensor::ALL {
            bank.record_off(sensor, 100);
            bank.record_on(sensor, 300);
        }
        bank.update();
        for sensor in Sensor::ALL {
            let cal = SENSOR_CALIBRATION[sensor.index()];
            assert_eq!(bank.distance(sensor), cal.a / 200f32.ln() - cal.b);
        }
    }

    #[test]
    fn side_distances_subtract_calibration_factor() {
        let bank = bank();
        for sensor in Sensor::ALL {
            bank.record_off(sensor, 100);
            bank.record_on(sensor, 300);
        }
        bank.add_calibration_factor(Sensor::SideLeft, 0.01);
        bank.add_calibration_factor(Sensor::SideRight, -0.02);
        bank.add_calibration_factor(Sensor::FrontLeft, 0.5);
        bank.update();

        for sensor in Sensor::ALL {
            let cal = SENSOR_CALIBRATION[sensor.index()];
            let factor = bank.calibration_factor(sensor);
            let expected = if sensor.is_side() {
                cal.a / 200f32.ln() - cal.b - factor
            } else {
                cal.a / 200f32.ln() - cal.b
            };
            assert_eq!(bank.distance(sensor), expected);
        }
        assert_eq!(bank.calibration_factor(Sensor::FrontLeft), 0.0);
    }

    #[test]
    fn invalid_sample_stores_no_reading() {
        let bank = bank();
        bank.record_off(Sensor::SideRight, 500);
        bank.record_on(Sensor::SideRight, 400);
        bank.update();
        assert_eq!(bank.distance(Sensor::SideRight), NO_READING);
        assert!(!bank.right_wall());
    }

    #[test]
    fn raw_reports_latest_pairs() {
        let bank = bank();
        bank.record_off(Sensor::FrontRight, 12);
        bank.record_on(Sensor::FrontRight, 34);
        assert_eq!(
            bank.raw()[Sensor::FrontRight.index()],
            SensorSample { off: 12, on: 34 }
        );
    }
}
