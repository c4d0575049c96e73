// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Linear/angular speed loop with wall-following error injection.
//!
//! The controller ramps ideal speeds toward the commanded targets and drives two PIDs. Call
//! [`step`](SpeedController::step) once per control tick with the measured speeds; it returns a
//! differential drive command.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! controller.enable();
//! controller.set_target_linear_speed(0.5);
//!
//! loop {
//!     let walls = WallErrors { side: SENSORS.side_error(), front: SENSORS.front_error() };
//!     let drive = controller.step(linear_speed, angular_speed, walls, 0.001);
//!     motors.apply(drive);
//! }
//! ```

use crate::control::Pid;
use crate::motion::Ramp;
use crate::platform::SpeedControl;

/// Operating mode of the speed controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// Closed-loop speed control toward the ideal speeds.
    SpeedControl,

    /// Loops stopped, no output.
    Disabled,
}

/// Gains turning wall errors (m) into angular speed error (rad/s).
///
/// A positive error steers right.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallGains {
    pub side: f32,
    pub front: f32,
}

/// Wall errors reported by the sensors for one tick (m).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WallErrors {
    pub side: f32,
    pub front: f32,
}

/// Normalized wheel drive in [-1.0, 1.0].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriveCommand {
    pub left: f32,
    pub right: f32,
}

impl DriveCommand {
    pub const OFF: DriveCommand = DriveCommand {
        left: 0.0,
        right: 0.0,
    };
}

pub struct SpeedController {
    linear_pid: Pid,
    angular_pid: Pid,
    mode: ControlMode,
    drive_enabled: bool,

    /// Commanded speeds (m/s, rad/s)
    target_linear: f32,
    target_angular: f32,

    /// Ramped setpoints actually tracked by the PIDs
    ideal_linear: f32,
    ideal_angular: f32,

    ramp: Ramp,
    /// Angular acceleration magnitude (rad/s²)
    angular_acceleration: f32,

    side_control: bool,
    front_control: bool,
    gains: WallGains,
}

impl SpeedController {
    /// Create a disabled controller.
    pub fn new(
        linear_pid: Pid,
        angular_pid: Pid,
        ramp: Ramp,
        angular_acceleration: f32,
        gains: WallGains,
    ) -> Self {
        Self {
            linear_pid,
            angular_pid,
            mode: ControlMode::Disabled,
            drive_enabled: false,
            target_linear: 0.0,
            target_angular: 0.0,
            ideal_linear: 0.0,
            ideal_angular: 0.0,
            ramp,
            angular_acceleration,
            side_control: false,
            front_control: false,
            gains,
        }
    }

    /// Start closed-loop control and allow drive output.
    pub fn enable(&mut self) {
        self.mode = ControlMode::SpeedControl;
        self.drive_enabled = true;
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[inline]
    pub fn drive_enabled(&self) -> bool {
        self.drive_enabled
    }

    #[inline]
    pub fn ideal_linear_speed(&self) -> f32 {
        self.ideal_linear
    }

    #[inline]
    pub fn ideal_angular_speed(&self) -> f32 {
        self.ideal_angular
    }

    #[inline]
    pub fn side_sensors_control(&self) -> bool {
        self.side_control
    }

    #[inline]
    pub fn front_sensors_control(&self) -> bool {
        self.front_control
    }

    fn approach(current: f32, target: f32, up: f32, down: f32) -> f32 {
        if current < target {
            (current + up).min(target)
        } else {
            (current - down).max(target)
        }
    }

    /// Run one control step.
    ///
    /// `linear_speed` (m/s) and `angular_speed` (rad/s) are measured; `dt` is the tick period in
    /// seconds.
    pub fn step(
        &mut self,
        linear_speed: f32,
        angular_speed: f32,
        walls: WallErrors,
        dt: f32,
    ) -> DriveCommand {
        if self.mode == ControlMode::Disabled || !self.drive_enabled {
            return DriveCommand::OFF;
        }

        self.ideal_linear = Self::approach(
            self.ideal_linear,
            self.target_linear,
            self.ramp.acceleration * dt,
            self.ramp.deceleration * dt,
        );
        let angular_step = self.angular_acceleration * dt;
        self.ideal_angular = Self::approach(
            self.ideal_angular,
            self.target_angular,
            angular_step,
            angular_step,
        );

        let mut wall_error = 0.0;
        if self.side_control {
            wall_error += self.gains.side * walls.side;
        }
        if self.front_control {
            wall_error += self.gains.front * walls.front;
        }

        let linear_error = self.ideal_linear - linear_speed;
        let angular_error = self.ideal_angular - angular_speed + wall_error;

        let linear = self.linear_pid.update(linear_error, dt);
        let angular = self.angular_pid.update(angular_error, dt);

        DriveCommand {
            left: (linear + angular).clamp(-1.0, 1.0),
            right: (linear - angular).clamp(-1.0, 1.0),
        }
    }
}

impl SpeedControl for SpeedController {
    fn target_linear_speed(&self) -> f32 {
        self.target_linear
    }

    fn set_target_linear_speed(&mut self, speed: f32) {
        self.target_linear = speed;
    }

    fn set_target_angular_speed(&mut self, speed: f32) {
        self.target_angular = speed;
    }

    fn linear_acceleration(&self) -> f32 {
        self.ramp.acceleration
    }

    fn linear_deceleration(&self) -> f32 {
        self.ramp.deceleration
    }

    fn set_side_sensors_control(&mut self, enabled: bool) {
        self.side_control = enabled;
    }

    fn set_front_sensors_control(&mut self, enabled: bool) {
        self.front_control = enabled;
    }

    fn reset_control_errors(&mut self) {
        self.linear_pid.reset();
        self.angular_pid.reset();
    }

    fn reset_control_all(&mut self) {
        self.reset_control_errors();
        self.target_linear = 0.0;
        self.target_angular = 0.0;
        self.ideal_linear = 0.0;
        self.ideal_angular = 0.0;
    }

    fn disable_motor_control(&mut self) {
        self.mode = ControlMode::Disabled;
    }

    fn drive_off(&mut self) {
        self.drive_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 0.001;

    fn controller() -> SpeedController {
        let mut c = SpeedController::new(
            Pid::new(1.0, 0.0, 0.0),
            Pid::new(0.1, 0.0, 0.0),
            Ramp {
                acceleration: 5.0,
                deceleration: 10.0,
            },
            100.0,
            WallGains {
                side: 10.0,
                front: 5.0,
            },
        );
        c.enable();
        c
    }

    #[test]
    fn starts_disabled_with_no_output() {
        let mut c = SpeedController::new(
            Pid::new(1.0, 0.0, 0.0),
            Pid::new(1.0, 0.0, 0.0),
            Ramp {
                acceleration: 1.0,
                deceleration: 1.0,
            },
            1.0,
            WallGains {
                side: 1.0,
                front: 1.0,
            },
        );
        c.set_target_linear_speed(1.0);
        assert_eq!(c.mode(), ControlMode::Disabled);
        assert_eq!(c.step(0.0, 0.0, WallErrors::default(), DT), DriveCommand::OFF);
    }

    #[test]
    fn ideal_speed_ramps_with_acceleration_and_deceleration() {
        let mut c = controller();
        c.set_target_linear_speed(1.0);
        for _ in 0..100 {
            c.step(0.0, 0.0, WallErrors::default(), DT);
        }
        assert_abs_diff_eq!(c.ideal_linear_speed(), 0.5, epsilon = 1e-4);

        c.set_target_linear_speed(0.0);
        for _ in 0..25 {
            c.step(0.0, 0.0, WallErrors::default(), DT);
        }
        assert_abs_diff_eq!(c.ideal_linear_speed(), 0.25, epsilon = 1e-4);

        for _ in 0..100 {
            c.step(0.0, 0.0, WallErrors::default(), DT);
        }
        assert_eq!(c.ideal_linear_speed(), 0.0);
    }

    #[test]
    fn forward_error_drives_both_wheels_equally() {
        let mut c = controller();
        c.set_target_linear_speed(1.0);
        let drive = c.step(0.0, 0.0, WallErrors::default(), DT);
        assert!(drive.left > 0.0);
        assert_eq!(drive.left, drive.right);
    }

    #[test]
    fn positive_angular_target_turns_right() {
        let mut c = controller();
        c.set_target_angular_speed(10.0);
        let drive = c.step(0.0, 0.0, WallErrors::default(), DT);
        assert!(drive.left > 0.0);
        assert!(drive.right < 0.0);
    }

    #[test]
    fn wall_errors_only_when_enabled() {
        let walls = WallErrors {
            side: 0.01,
            front: 0.02,
        };

        let mut c = controller();
        assert_eq!(c.step(0.0, 0.0, walls, DT), DriveCommand::OFF);

        c.set_side_sensors_control(true);
        let side = c.step(0.0, 0.0, walls, DT);
        assert_abs_diff_eq!(side.left, 0.01, epsilon = 1e-6);
        assert_abs_diff_eq!(side.right, -0.01, epsilon = 1e-6);

        c.set_front_sensors_control(true);
        let both = c.step(0.0, 0.0, walls, DT);
        assert_abs_diff_eq!(both.left, 0.02, epsilon = 1e-6);
    }

    #[test]
    fn drive_off_and_disable_silence_output() {
        let mut c = controller();
        c.set_target_linear_speed(1.0);
        c.drive_off();
        assert_eq!(c.step(0.0, 0.0, WallErrors::default(), DT), DriveCommand::OFF);

        let mut c = controller();
        c.set_target_linear_speed(1.0);
        c.disable_motor_control();
        assert_eq!(c.mode(), ControlMode::Disabled);
        assert_eq!(c.step(0.0, 0.0, WallErrors::default(), DT), DriveCommand::OFF);
    }

    #[test]
    fn reset_all_clears_targets_and_ideals() {
        let mut c = controller();
        c.set_target_linear_speed(1.0);
        c.set_target_angular_speed(2.0);
        for _ in 0..10 {
            c.step(0.0, 0.0, WallErrors::default(), DT);
        }
        c.reset_control_all();
        assert_eq!(c.target_linear_speed(), 0.0);
        assert_eq!(c.ideal_linear_speed(), 0.0);
        assert_eq!(c.ideal_angular_speed(), 0.0);
    }
}
