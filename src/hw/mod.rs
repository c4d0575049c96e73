// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! Wheel-level building blocks written against `embedded-hal` traits, plus the STM32F777 bindings
//! (enabled by the `firmware` feature) that implement the crate's hardware seams.
//!
//! ## Modules
//!
//! - [`led`] - Status LED, used as the motion heartbeat.
//! - [`motor`] - Two-input H-bridge wheel motor.
//! - [`odometry`] - Wheel speeds and travelled distance from encoder deltas.
//! - [`record`] - Log record framing for the debug terminal.
//! - `adc` - Injected IR conversions on ADC1, battery conversion on ADC2.
//! - `board` - Tick clock, odometry and speed-controller binding; control tick.
//! - `encoder` - TIM2/TIM3 quadrature encoders.
//! - `gpio` - `embedded-hal` 1.0 output pins.
//! - `ir` - Emitters and ADCs as the sensor front end.
//! - `pins` - Board pin map.
//! - `pwm` - TIM4 motor PWM.
//! - `usart` - Debug terminal and serial logger.

pub mod led;
pub mod motor;
pub mod odometry;
pub mod record;

#[cfg(feature = "firmware")]
pub mod adc;
#[cfg(feature = "firmware")]
pub mod board;
#[cfg(feature = "firmware")]
pub mod encoder;
#[cfg(feature = "firmware")]
pub mod gpio;
#[cfg(feature = "firmware")]
pub mod ir;
#[cfg(feature = "firmware")]
pub mod pins;
#[cfg(feature = "firmware")]
pub mod pwm;
#[cfg(feature = "firmware")]
pub mod usart;

pub use led::Led;
pub use motor::HBridge;
pub use odometry::{WheelOdometry, WheelSpeeds};

#[cfg(feature = "firmware")]
pub use board::{Board, Drivetrain};
#[cfg(feature = "firmware")]
pub use encoder::Encoder;
#[cfg(feature = "firmware")]
pub use gpio::BoardPin;
#[cfg(feature = "firmware")]
pub use ir::IrFrontEnd;
#[cfg(feature = "firmware")]
pub use usart::{SerialLogger, Usart};
