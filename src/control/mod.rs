// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! Closed-loop wheel speed control behind the setpoint API used by the motion layer.
//!
//! ## Modules
//!
//! - [`pid`] - PID controller on a precomputed error.
//! - [`speed_controller`] - Linear/angular speed loop with wall-following corrections.

pub mod pid;
pub mod speed_controller;

pub use pid::Pid;
pub use speed_controller::{ControlMode, DriveCommand, SpeedController, WallErrors, WallGains};
