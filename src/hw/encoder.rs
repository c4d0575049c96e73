// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature wheel encoders via STM32F7 timers in encoder mode.
//!
//! TIM2 (32-bit) reads the left wheel and TIM3 (16-bit) the right wheel. The control tick only
//! needs the count change since the previous tick, which wrapping subtraction gives for both
//! widths as long as fewer than half a counter range passes between reads.

use stm32f7xx_hal::pac;

pub struct Encoder<TIM> {
    tim: TIM,
    last: u32,
}

impl Encoder<pac::TIM2> {
    /// Configure TIM2 as a quadrature encoder with full 32-bit range.
    pub fn tim2(tim2: pac::TIM2) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // Auto-reload: max 32-bit
        tim.arr.write(|w| w.bits(0xFFFF_FFFF));

        // Slave mode: encoder mode 3 (count on both TI1 and TI2)
        tim.smcr.modify(|_, w| w.sms().bits(0b011));
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());
        tim.ccer.modify(|_, w| {
            w.cc1p()
                .clear_bit()
                .cc2p()
                .clear_bit()
                .cc1e()
                .set_bit()
                .cc2e()
                .set_bit()
        });

        tim.cnt.write(|w| w.bits(0));
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim, last: 0 }
    }

    /// Counts since the previous call.
    pub fn delta(&mut self) -> i32 {
        let now = self.tim.cnt.read().cnt().bits();
        let delta = now.wrapping_sub(self.last) as i32;
        self.last = now;
        delta
    }
}

impl Encoder<pac::TIM3> {
    /// Configure TIM3 as a quadrature encoder with full 16-bit range.
    pub fn tim3(tim3: pac::TIM3) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;

        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // Auto-reload: max 16-bit
        tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

        tim.smcr.modify(|_, w| w.sms().bits(0b011));
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());

        // Right wheel is mirrored: invert TI1 so forward counts up
        tim.ccer.modify(|_, w| {
            w.cc1p()
                .set_bit()
                .cc2p()
                .clear_bit()
                .cc1e()
                .set_bit()
                .cc2e()
                .set_bit()
        });

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim, last: 0 }
    }

    /// Counts since the previous call.
    pub fn delta(&mut self) -> i32 {
        let now = self.tim.cnt.read().cnt().bits();
        let delta = now.wrapping_sub(self.last as u16) as i16;
        self.last = now as u32;
        delta as i32
    }
}
