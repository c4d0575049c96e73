// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Micromouse Firmware
//!
//! IR wall sensing and cell-to-cell locomotion for a micromouse, written in Rust, targeting an
//! STM32F777 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`sensors`] | Emitter/phototransistor sampling, distances, walls, side calibration |
//! | [`motion`] | Acceleration profiles, cell tracking, turns, direction dispatch |
//! | [`control`] | Linear/angular speed loop (PID) with wall-following corrections |
//! | [`platform`] | Hardware seams (clock, odometry, speed-control API, indicator) and waits |
//! | [`hw`] | Motor/LED/odometry building blocks and the STM32F7 bindings |
//! | [`config`] | Maze geometry and tick rate |
//! | [`sync`] | Atomic `f32` slots shared with interrupts |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod hw;
pub mod motion;
pub mod platform;
pub mod sensors;
pub mod sync;
