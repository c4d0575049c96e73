// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Push-pull outputs exposed through the `embedded-hal` 1.0 `OutputPin` trait.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Output, PushPull};

/// Push-pull output, generic over any GPIO pin.
pub struct BoardPin<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> BoardPin<P, N> {
    /// Configure `pin` as a push-pull output driven low.
    pub fn low<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_low();
        Self { pin }
    }
}

impl<const P: char, const N: u8> ErrorType for BoardPin<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for BoardPin<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}
