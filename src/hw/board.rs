// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board binding of the motion seams.
//!
//! The control tick interrupt owns a [`Drivetrain`] and publishes the tick count and position
//! through atomics. The speed controller lives behind a critical-section mutex shared by the
//! tick interrupt and the foreground [`Board`].

use core::cell::RefCell;
use core::convert::Infallible;
use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use cortex_m::interrupt::{self, Mutex};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use stm32f7xx_hal::pac;

use crate::control::{DriveCommand, SpeedController, WallErrors};
use crate::hw::{Encoder, HBridge, Led, WheelOdometry};
use crate::platform::{Clock, Indicator, Odometry, SpeedControl};
use crate::sensors::SensorBank;

/// Control ticks since boot.
pub static TICKS: AtomicU32 = AtomicU32::new(0);

/// Average wheel position (µm), written by the control tick.
pub static POSITION_UM: AtomicI32 = AtomicI32::new(0);

static CONTROL: Mutex<RefCell<Option<SpeedController>>> = Mutex::new(RefCell::new(None));

/// Hand the speed controller over to the control tick.
pub fn install_controller(controller: SpeedController) {
    interrupt::free(|cs| {
        CONTROL.borrow(cs).replace(Some(controller));
    });
}

fn with_control<R>(f: impl FnOnce(&mut SpeedController) -> R) -> Option<R> {
    interrupt::free(|cs| CONTROL.borrow(cs).borrow_mut().as_mut().map(f))
}

/// Foreground view of the robot used by the motion engine.
pub struct Board<PIN: OutputPin> {
    led: Led<PIN>,
}

impl<PIN: OutputPin> Board<PIN> {
    pub fn new(led: Led<PIN>) -> Self {
        Self { led }
    }
}

impl<PIN: OutputPin> Clock for Board<PIN> {
    fn ticks(&mut self) -> u32 {
        TICKS.load(Ordering::Relaxed)
    }
}

impl<PIN: OutputPin> Odometry for Board<PIN> {
    fn position_um(&mut self) -> i32 {
        POSITION_UM.load(Ordering::Relaxed)
    }
}

impl<PIN: OutputPin> Indicator for Board<PIN> {
    fn toggle(&mut self) {
        self.led.toggle();
    }
}

impl<PIN: OutputPin> SpeedControl for Board<PIN> {
    fn target_linear_speed(&self) -> f32 {
        with_control(|c| c.target_linear_speed()).unwrap_or(0.0)
    }

    fn set_target_linear_speed(&mut self, speed: f32) {
        with_control(|c| c.set_target_linear_speed(speed));
    }

    fn set_target_angular_speed(&mut self, speed: f32) {
        with_control(|c| c.set_target_angular_speed(speed));
    }

    fn linear_acceleration(&self) -> f32 {
        with_control(|c| c.linear_acceleration()).unwrap_or(0.0)
    }

    fn linear_deceleration(&self) -> f32 {
        with_control(|c| c.linear_deceleration()).unwrap_or(0.0)
    }

    fn set_side_sensors_control(&mut self, enabled: bool) {
        with_control(|c| c.set_side_sensors_control(enabled));
    }

    fn set_front_sensors_control(&mut self, enabled: bool) {
        with_control(|c| c.set_front_sensors_control(enabled));
    }

    fn reset_control_errors(&mut self) {
        with_control(|c| c.reset_control_errors());
    }

    fn reset_control_all(&mut self) {
        with_control(|c| c.reset_control_all());
    }

    fn disable_motor_control(&mut self) {
        with_control(|c| c.disable_motor_control());
    }

    fn drive_off(&mut self) {
        with_control(|c| c.drive_off());
    }
}

/// Encoders, odometry and motors serviced by the control tick.
pub struct Drivetrain<L1, L2, R1, R2> {
    left_encoder: Encoder<pac::TIM2>,
    right_encoder: Encoder<pac::TIM3>,
    odometry: WheelOdometry,
    left: HBridge<L1, L2>,
    right: HBridge<R1, R2>,
}

impl<L1, L2, R1, R2> Drivetrain<L1, L2, R1, R2>
where
    L1: SetDutyCycle<Error = Infallible>,
    L2: SetDutyCycle<Error = Infallible>,
    R1: SetDutyCycle<Error = Infallible>,
    R2: SetDutyCycle<Error = Infallible>,
{
    pub fn new(
        left_encoder: Encoder<pac::TIM2>,
        right_encoder: Encoder<pac::TIM3>,
        odometry: WheelOdometry,
        left: HBridge<L1, L2>,
        right: HBridge<R1, R2>,
    ) -> Self {
        Self {
            left_encoder,
            right_encoder,
            odometry,
            left,
            right,
        }
    }

    /// One control tick: odometry, distance update, speed loop, motor output, tick count.
    pub fn tick(&mut self, sensors: &SensorBank, dt: f32) {
        let speeds = self.odometry.update(
            self.left_encoder.delta(),
            self.right_encoder.delta(),
            dt,
        );
        POSITION_UM.store(self.odometry.position_um(), Ordering::Relaxed);

        sensors.update();
        let walls = WallErrors {
            side: sensors.side_error(),
            front: sensors.front_error(),
        };

        let drive = with_control(|c| c.step(speeds.linear, speeds.angular, walls, dt))
            .unwrap_or(DriveCommand::OFF);
        let _ = self.left.set_speed(drive.left);
        let _ = self.right.set_speed(drive.right);

        TICKS.fetch_add(1, Ordering::Relaxed);
    }
}
