// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Locomotion
//!
//! Timed, closed-loop cell-to-cell motion built on top of the speed-control setpoint API.
//!
//! ## Modules
//!
//! - [`kinematics`] - Constant-acceleration distance and time planning.
//! - [`cell`] - Position tracking inside the current maze cell.
//! - [`engine`] - Straight moves: accelerate, decelerate, stops, cell crossing.
//! - [`turn`] - Open-loop 90° in-place turns.
//! - [`direction`] - Direction dispatch into composed moves.

pub mod cell;
pub mod direction;
pub mod engine;
pub mod kinematics;
pub mod turn;

pub use cell::CellTracker;
pub use direction::Direction;
pub use engine::Motion;
pub use kinematics::Ramp;
pub use turn::Turn;
