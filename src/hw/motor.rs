// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-input H-bridge wheel motor.
//!
//! Each motor is driven by two PWM inputs: IN1 carries the duty cycle going forward, IN2 going
//! backward. Both at zero lets the wheel coast.

use embedded_hal::pwm::SetDutyCycle;
#[allow(unused_imports)]
use micromath::F32Ext;

/// Speeds below this magnitude coast the motor.
const DEADBAND: f32 = 0.001;

pub struct HBridge<IN1, IN2> {
    in1: IN1,
    in2: IN2,
}

impl<IN1, IN2, E> HBridge<IN1, IN2>
where
    IN1: SetDutyCycle<Error = E>,
    IN2: SetDutyCycle<Error = E>,
{
    /// Create a coasting motor.
    pub fn new(mut in1: IN1, mut in2: IN2) -> Result<Self, E> {
        in1.set_duty_cycle_fully_off()?;
        in2.set_duty_cycle_fully_off()?;
        Ok(Self { in1, in2 })
    }

    /// Drive the motor at `speed` in [-1.0, 1.0]. Values outside are clamped.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), E> {
        let speed = speed.clamp(-1.0, 1.0);
        let duty = (speed.abs() * self.in1.max_duty_cycle() as f32) as u16;

        if speed > DEADBAND {
            self.in2.set_duty_cycle_fully_off()?;
            self.in1.set_duty_cycle(duty)
        } else if speed < -DEADBAND {
            self.in1.set_duty_cycle_fully_off()?;
            self.in2.set_duty_cycle(duty)
        } else {
            self.coast()
        }
    }

    pub fn coast(&mut self) -> Result<(), E> {
        self.in1.set_duty_cycle_fully_off()?;
        self.in2.set_duty_cycle_fully_off()
    }
}
