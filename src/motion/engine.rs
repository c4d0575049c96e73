// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cell-to-cell straight motion.
//!
//! [`Motion`] owns the platform handle and the cell tracker, and reads walls from a shared
//! [`SensorBank`]. All moves block until the robot gets there.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut motion = Motion::new(board, &SENSORS, Config::DEFAULT);
//! motion.set_starting_position();
//! motion.move_front();
//! motion.stop_middle();
//! ```

use log::{debug, info};

use crate::config::{micrometers, Config};
use crate::motion::{CellTracker, Ramp};
use crate::platform::{wait_for_position, wait_ticks, Platform};
use crate::sensors::{calibrate_side_sensors, SensorBank, SideCorrection, WallsAround};

/// Cruise speed until changed with [`Motion::set_max_linear_speed`] (m/s).
pub const DEFAULT_MAX_LINEAR_SPEED: f32 = 0.8;

pub struct Motion<'a, P: Platform> {
    pub(crate) platform: P,
    pub(crate) sensors: &'a SensorBank,
    pub(crate) config: Config,
    pub(crate) cell: CellTracker,
    max_linear_speed: f32,
}

impl<'a, P: Platform> Motion<'a, P> {
    /// Robot at the start of a cell, nothing travelled yet.
    pub fn new(platform: P, sensors: &'a SensorBank, config: Config) -> Self {
        Self {
            platform,
            sensors,
            config,
            cell: CellTracker::default(),
            max_linear_speed: DEFAULT_MAX_LINEAR_SPEED,
        }
    }

    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[inline]
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    #[inline]
    pub fn sensors(&self) -> &'a SensorBank {
        self.sensors
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn cell(&self) -> &CellTracker {
        &self.cell
    }

    #[inline]
    pub fn walls(&self) -> WallsAround {
        self.sensors.walls()
    }

    #[inline]
    pub fn max_linear_speed(&self) -> f32 {
        self.max_linear_speed
    }

    #[inline]
    pub fn set_max_linear_speed(&mut self, speed: f32) {
        self.max_linear_speed = speed;
    }

    /// Assume the robot tail is touching the wall behind it.
    pub fn set_starting_position(&mut self) {
        let position = self.platform.position_um();
        self.cell.reset_to_start(position, &self.config);
        info!(
            "starting position: origin {} um, shift {} m",
            position,
            self.cell.cell_shift()
        );
    }

    /// Run the side-sensor calibration using the platform clock.
    pub fn calibrate_side_sensors(&mut self) -> SideCorrection {
        calibrate_side_sensors(self.sensors, &mut self.platform)
    }

    fn ramp(&self) -> Ramp {
        Ramp {
            acceleration: self.platform.linear_acceleration(),
            deceleration: self.platform.linear_deceleration(),
        }
    }

    /// Distance needed to go from the commanded linear speed to `speed` (m).
    pub fn distance_to_speed(&self, speed: f32) -> f32 {
        self.ramp()
            .distance_to_speed(self.platform.target_linear_speed(), speed)
    }

    /// [`distance_to_speed`](Self::distance_to_speed) in encoder units (µm).
    pub fn micrometers_to_speed(&self, speed: f32) -> i32 {
        micrometers(self.distance_to_speed(speed))
    }

    /// Time needed to go from the commanded linear speed to `speed` (s).
    pub fn time_to_speed(&self, speed: f32) -> f32 {
        self.ramp()
            .time_to_speed(self.platform.target_linear_speed(), speed)
    }

    pub fn ticks_to_speed(&self, speed: f32) -> u32 {
        self.ramp().ticks_to_speed(
            self.platform.target_linear_speed(),
            speed,
            self.config.tick_frequency_hz,
        )
    }

    /// Command the maximum linear speed and block until `distance` meters past `start_um`.
    pub fn accelerate(&mut self, start_um: i32, distance: f32) {
        let target = start_um + micrometers(distance);
        self.platform.set_target_angular_speed(0.0);
        self.platform.set_target_linear_speed(self.max_linear_speed);
        wait_for_position(&mut self.platform, target);
    }

    /// Travel `distance` meters past `start_um` and arrive at `speed`.
    ///
    /// Cruises at the maximum speed until the braking point, then commands `speed` and waits for
    /// the planned braking time. The braking plan starts from the cruise speed.
    pub fn decelerate(&mut self, start_um: i32, distance: f32, speed: f32) {
        self.platform.set_target_angular_speed(0.0);
        self.platform.set_target_linear_speed(self.max_linear_speed);

        let target = start_um + micrometers(distance) - self.micrometers_to_speed(speed);
        let braking_ticks = self.ticks_to_speed(speed);

        wait_for_position(&mut self.platform, target);
        self.platform.set_target_linear_speed(speed);
        let start = self.platform.ticks();
        wait_ticks(&mut self.platform, start, braking_ticks);
    }

    /// Inject wall errors into the control loop for the walls currently in view.
    pub(crate) fn enable_walls_control(&mut self) {
        let walls = self.sensors.walls();
        self.platform.set_front_sensors_control(walls.front);
        self.platform
            .set_side_sensors_control(walls.left || walls.right);
    }

    pub fn disable_walls_control(&mut self) {
        self.platform.set_side_sensors_control(false);
        self.platform.set_front_sensors_control(false);
    }

    /// Start tracking a new cell at the current position, re-anchored on a visible front wall.
    pub(crate) fn entered_next_cell(&mut self) {
        let position = self.platform.position_um();
        let front_wall = if self.sensors.front_wall() {
            Some(self.sensors.front_wall_distance())
        } else {
            None
        };
        let correction = self.cell.enter_next_cell(position, front_wall, &self.config);
        self.platform.toggle();
        debug!(
            "entered cell at {} um (front wall correction {} um)",
            self.cell.cell_origin_um(),
            correction
        );
    }

    fn stop_at(&mut self, distance: f32) {
        self.enable_walls_control();
        let origin = self.cell.cell_origin_um();
        self.decelerate(origin, distance, 0.0);
        self.disable_walls_control();
        self.platform.reset_control_errors();
    }

    /// Stop exactly at the end of the current cell, which becomes the new cell start.
    pub fn stop_end(&mut self) {
        self.stop_at(self.config.cell_dimension);
        self.entered_next_cell();
    }

    /// Stop where the head would touch the front wall.
    pub fn stop_head_front_wall(&mut self) {
        let distance = self.config.head_to_front_wall();
        self.stop_at(distance);
        self.cell.stopped_at(distance);
    }

    /// Stop at the middle of the current cell.
    pub fn stop_middle(&mut self) {
        let distance = self.config.cell_dimension / 2.0;
        self.stop_at(distance);
        self.cell.stopped_at(distance);
    }

    /// Cross into the next cell measuring from where the robot is now.
    pub fn move_out(&mut self) {
        self.enable_walls_control();
        let position = self.platform.position_um();
        let remaining = self.cell.remaining(&self.config);
        self.accelerate(position, remaining);
        self.entered_next_cell();
    }

    /// Cross into the next cell measuring from the current cell start.
    pub fn move_front(&mut self) {
        self.enable_walls_control();
        let origin = self.cell.cell_origin_um();
        let remaining = self.cell.remaining(&self.config);
        self.accelerate(origin, remaining);
        self.entered_next_cell();
    }

    /// Back to idle: no speed loops, no wall control, no drive, no control state.
    pub fn reset_motion(&mut self) {
        self.platform.disable_motor_control();
        self.disable_walls_control();
        self.platform.drive_off();
        self.platform.reset_control_all();
        info!("motion reset");
    }
}
