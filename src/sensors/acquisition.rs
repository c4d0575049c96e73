// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Emitter/phototransistor sampling state machine.
//!
//! Runs from a periodic timer interrupt, one phase per call, one sensor at a time so emitters never
//! light a neighbour's phototransistor:
//!
//! 1. Start the battery conversion. Record the ambient conversion started in phase 4 as the
//!    "emitter off" sample and power the emitter on.
//! 2. Start the phototransistor conversion under illumination.
//! 3. Record the "emitter on" sample and power the emitter off.
//! 4. Start the ambient conversion consumed by phase 1, then move to the next sensor.
//!
//! Each phase is a handful of register operations and never blocks.

use crate::sensors::{Sensor, SensorBank};

/// Analog front end shared by the four sensors.
pub trait FrontEnd {
    /// Kick off the battery-voltage conversion.
    fn start_battery_conversion(&mut self);
    /// Kick off the phototransistor conversion (all sensors, injected).
    fn start_sensor_conversion(&mut self);
    /// Result of the last phototransistor conversion for `sensor`.
    fn read_sensor(&mut self, sensor: Sensor) -> u16;
    fn set_emitter(&mut self, sensor: Sensor, on: bool);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    RecordOff,
    StartLit,
    RecordOn,
    StartAmbient,
}

pub struct Acquisition {
    phase: Phase,
    index: u8,
}

impl Acquisition {
    pub const fn new() -> Self {
        Self {
            phase: Phase::RecordOff,
            index: 0,
        }
    }

    /// Sensor currently being sampled.
    #[inline]
    pub fn sensor(&self) -> Option<Sensor> {
        Sensor::from_index(self.index)
    }

    /// Advance one phase.
    pub fn step<F: FrontEnd + ?Sized>(&mut self, front_end: &mut F, bank: &SensorBank) {
        let sensor = self.sensor();

        match self.phase {
            Phase::RecordOff => {
                front_end.start_battery_conversion();
                if let Some(sensor) = sensor {
                    bank.record_off(sensor, front_end.read_sensor(sensor));
                    front_end.set_emitter(sensor, true);
                }
                self.phase = Phase::StartLit;
            }
            Phase::StartLit => {
                front_end.start_sensor_conversion();
                self.phase = Phase::RecordOn;
            }
            Phase::RecordOn => {
                if let Some(sensor) = sensor {
                    bank.record_on(sensor, front_end.read_sensor(sensor));
                    front_end.set_emitter(sensor, false);
                }
                self.phase = Phase::StartAmbient;
            }
            Phase::StartAmbient => {
                front_end.start_sensor_conversion();
                self.phase = Phase::RecordOff;
                self.index = if self.index as usize >= Sensor::COUNT - 1 {
                    0
                } else {
                    self.index + 1
                };
            }
        }
    }
}

impl Default for Acquisition {
    fn default() -> Self {
        Self::new()
    }
}
