// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware seams consumed by the motion layer.
//!
//! The traits here are the only way motion code touches the board: a free-running tick counter, the
//! encoder-derived position, the speed-control setpoint API and an indicator LED. The firmware
//! implements them in `hw::board`; host tests use [`sim::SimRobot`].
//!
//! ## Blocking
//!
//! Every wait in this crate spins on one of these counters. There is no timeout: a stuck encoder or a
//! stalled tick source hangs the caller forever. That is the accepted fail-stop behavior for the
//! robot; do not call the waits from interrupt context.

/// Monotonic tick counter advanced by the control loop.
pub trait Clock {
    /// Current tick count. Wraps on overflow.
    fn ticks(&mut self) -> u32;
}

/// Encoder-derived travelled distance.
pub trait Odometry {
    /// Average of both wheel positions, in micrometers.
    fn position_um(&mut self) -> i32;
}

/// Setpoint API of the linear/angular speed control loop.
pub trait SpeedControl {
    /// Last commanded linear speed (m/s).
    fn target_linear_speed(&self) -> f32;
    fn set_target_linear_speed(&mut self, speed: f32);
    fn set_target_angular_speed(&mut self, speed: f32);

    /// Magnitude of the linear acceleration used when speeding up (m/s²).
    fn linear_acceleration(&self) -> f32;
    /// Magnitude of the linear deceleration used when slowing down (m/s²).
    fn linear_deceleration(&self) -> f32;

    /// Feed the side-sensor corridor error into the angular loop.
    fn set_side_sensors_control(&mut self, enabled: bool);
    /// Feed the front-sensor alignment error into the angular loop.
    fn set_front_sensors_control(&mut self, enabled: bool);

    /// Clear integrators and derivative history of both loops.
    fn reset_control_errors(&mut self);
    /// Clear every piece of control state, including ideal speeds and targets.
    fn reset_control_all(&mut self);
    /// Stop running the speed loops.
    fn disable_motor_control(&mut self);
    /// Cut motor drive output.
    fn drive_off(&mut self);
}

/// Visual heartbeat (e.g. an LED).
pub trait Indicator {
    fn toggle(&mut self);
}

/// Everything the motion engine needs from the board.
pub trait Platform: Clock + Odometry + SpeedControl + Indicator {}

impl<T: Clock + Odometry + SpeedControl + Indicator> Platform for T {}

/// Spin until `done` returns true.
#[inline]
pub fn spin_until<F: FnMut() -> bool>(mut done: F) {
    while !done() {}
}

/// Block until the robot position reaches `target_um`.
pub fn wait_for_position<O: Odometry + ?Sized>(odometry: &mut O, target_um: i32) {
    spin_until(|| odometry.position_um() >= target_um);
}

/// Block until `duration` ticks have elapsed since `start`.
pub fn wait_ticks<C: Clock + ?Sized>(clock: &mut C, start: u32, duration: u32) {
    spin_until(|| clock.ticks().wrapping_sub(start) >= duration);
}

/// Block for `duration` ticks from now.
pub fn sleep_ticks<C: Clock + ?Sized>(clock: &mut C, duration: u32) {
    let start = clock.ticks();
    wait_ticks(clock, start, duration);
}

#[cfg(test)]
pub mod sim {
    //! Simulated robot for host tests.
    //!
    //! Every clock or odometry poll advances the simulation by one tick. The real speed ramps
    //! toward the commanded linear speed using the commanded acceleration/deceleration.

    use super::*;
    use std::vec::Vec;

    #[derive(Copy, Clone, Debug, PartialEq)]
    pub enum Event {
        Linear(u32, f32),
        Angular(u32, f32),
        SideControl(bool),
        FrontControl(bool),
        ResetErrors,
        ResetAll,
        DisableMotorControl,
        DriveOff,
    }

    pub struct SimRobot {
        pub tick: u32,
        pub tick_hz: f32,
        /// Position in meters, kept as float to avoid accumulating truncation.
        pub position_m: f32,
        pub speed: f32,
        pub target_linear: f32,
        pub target_angular: f32,
        pub acceleration: f32,
        pub deceleration: f32,
        pub side_control: bool,
        pub front_control: bool,
        pub toggles: u32,
        pub events: Vec<Event>,
        /// Commanded speed is applied instantly when true.
        pub instant_speed: bool,
    }

    impl SimRobot {
        pub fn new() -> Self {
            Self {
                tick: 0,
                tick_hz: 1000.0,
                position_m: 0.0,
                speed: 0.0,
                target_linear: 0.0,
                target_angular: 0.0,
                acceleration: 4.0,
                deceleration: 4.0,
                side_control: false,
                front_control: false,
                toggles: 0,
                events: Vec::new(),
                instant_speed: false,
            }
        }

        fn advance(&mut self) {
            let dt = 1.0 / self.tick_hz;
            if self.instant_speed {
                self.speed = self.target_linear;
            } else if self.speed < self.target_linear {
                self.speed = (self.speed + self.acceleration * dt).min(self.target_linear);
            } else {
                self.speed = (self.speed - self.deceleration * dt).max(self.target_linear);
            }
            self.position_m += self.speed * dt;
            self.tick = self.tick.wrapping_add(1);
        }

        pub fn angular_commands(&self) -> Vec<(u32, f32)> {
            self.events
                .iter()
                .filter_map(|e| match *e {
                    Event::Angular(t, w) => Some((t, w)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Clock for SimRobot {
        fn ticks(&mut self) -> u32 {
            self.advance();
            self.tick
        }
    }

    impl Odometry for SimRobot {
        fn position_um(&mut self) -> i32 {
            self.advance();
            (self.position_m * 1_000_000.0) as i32
        }
    }

    impl SpeedControl for SimRobot {
        fn target_linear_speed(&self) -> f32 {
            self.target_linear
        }

        fn set_target_linear_speed(&mut self, speed: f32) {
            self.target_linear = speed;
            self.events.push(Event::Linear(self.tick, speed));
        }

        fn set_target_angular_speed(&mut self, speed: f32) {
            self.target_angular = speed;
            self.events.push(Event::Angular(self.tick, speed));
        }

        fn linear_acceleration(&self) -> f32 {
            self.acceleration
        }

        fn linear_deceleration(&self) -> f32 {
            self.deceleration
        }

        fn set_side_sensors_control(&mut self, enabled: bool) {
            self.side_control = enabled;
            self.events.push(Event::SideControl(enabled));
        }

        fn set_front_sensors_control(&mut self, enabled: bool) {
            self.front_control = enabled;
            self.events.push(Event::FrontControl(enabled));
        }

        fn reset_control_errors(&mut self) {
            self.events.push(Event::ResetErrors);
        }

        fn reset_control_all(&mut self) {
            self.events.push(Event::ResetAll);
        }

        fn disable_motor_control(&mut self) {
            self.events.push(Event::DisableMotorControl);
        }

        fn drive_off(&mut self) {
            self.events.push(Event::DriveOff);
        }
    }

    impl Indicator for SimRobot {
        fn toggle(&mut self) {
            self.toggles += 1;
        }
    }
}
