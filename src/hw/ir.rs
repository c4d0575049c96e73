// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! IR emitters and phototransistor ADCs wired together as the sensor front end.

use embedded_hal::digital::OutputPin;
use stm32f7xx_hal::pac;

use crate::hw::adc::Adc;
use crate::hw::pins::EmitterPins;
use crate::sensors::{FrontEnd, Sensor};

/// ADC1 channels of the phototransistors, in [`Sensor`] index order.
pub const IR_CHANNELS: [u8; Sensor::COUNT] = [10, 11, 12, 13];

/// ADC2 channel of the battery divider.
pub const BATTERY_CHANNEL: u8 = 9;

/// Battery divider ratio (V at the cell per V at the pin).
const BATTERY_DIVIDER: f32 = 2.0;

const ADC_REFERENCE_V: f32 = 3.3;

const ADC_FULL_SCALE: f32 = 4095.0;

pub struct IrFrontEnd {
    sensors: Adc<pac::ADC1>,
    battery: Adc<pac::ADC2>,
    emitters: EmitterPins,
}

impl IrFrontEnd {
    pub fn new(adc1: pac::ADC1, adc2: pac::ADC2, emitters: EmitterPins) -> Self {
        Self {
            sensors: Adc::adc1(adc1, IR_CHANNELS),
            battery: Adc::adc2(adc2, BATTERY_CHANNEL),
            emitters,
        }
    }

    /// Battery voltage from the last conversion (V).
    pub fn battery_voltage(&self) -> f32 {
        self.battery.last() as f32 * ADC_REFERENCE_V / ADC_FULL_SCALE * BATTERY_DIVIDER
    }
}

impl FrontEnd for IrFrontEnd {
    fn start_battery_conversion(&mut self) {
        self.battery.start();
    }

    fn start_sensor_conversion(&mut self) {
        self.sensors.start_injected();
    }

    fn read_sensor(&mut self, sensor: Sensor) -> u16 {
        self.sensors.injected(sensor.index())
    }

    fn set_emitter(&mut self, sensor: Sensor, on: bool) {
        let e = &mut self.emitters;
        let pin: &mut dyn OutputPin<Error = core::convert::Infallible> = match sensor {
            Sensor::SideLeft => &mut e.side_left,
            Sensor::SideRight => &mut e.side_right,
            Sensor::FrontLeft => &mut e.front_left,
            Sensor::FrontRight => &mut e.front_right,
        };
        if on {
            pin.set_high().ok();
        } else {
            pin.set_low().ok();
        }
    }
}
