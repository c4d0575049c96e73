// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Wall Sensing
//!
//! Four infrared emitter/phototransistor pairs share one analog front end. They are sampled one at
//! a time, with the emitter off and then on, and the difference is turned into a metric distance.
//!
//! ## Modules
//!
//! - [`acquisition`] - Interrupt-driven 4-phase sampling state machine.
//! - [`bank`] - Shared sample, distance and calibration storage.
//! - [`distance`] - Logarithmic response model and corridor/alignment errors.
//! - [`walls`] - Wall presence thresholds.
//! - [`calibration`] - Side-sensor offset calibration.

pub mod acquisition;
pub mod bank;
pub mod calibration;
pub mod distance;
pub mod walls;

pub use acquisition::{Acquisition, FrontEnd};
pub use bank::{Sensor, SensorBank, SensorSample};
pub use calibration::{calibrate_side_sensors, SideCorrection};
pub use distance::{Calibration, Distances, ReadingError, NO_READING, SENSOR_CALIBRATION};
pub use walls::WallsAround;
