// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TIM4 four-channel PWM for the H-bridge inputs.
//!
//! Channels are exposed through the `embedded-hal` 1.0 `SetDutyCycle` trait so the motor driver
//! stays hardware-agnostic.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::pac;

/// One TIM4 output compare channel (`C` in 1..=4).
pub struct Tim4Channel<const C: u8> {
    max_duty: u16,
}

/// Configure TIM4 for edge-aligned PWM mode 1 on all four channels.
///
/// `timer_hz` is the TIM4 kernel clock, `pwm_hz` the output frequency.
pub fn tim4(
    tim4: pac::TIM4,
    timer_hz: u32,
    pwm_hz: u32,
) -> (Tim4Channel<1>, Tim4Channel<2>, Tim4Channel<3>, Tim4Channel<4>) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

    let tim = tim4;
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    let period = (timer_hz / pwm_hz).clamp(2, 0x1_0000);
    let max_duty = (period - 1) as u16;
    tim.psc.write(|w| unsafe { w.bits(0) });
    tim.arr.write(|w| unsafe { w.bits(max_duty as u32) });

    // OCxM = 0b110 (PWM mode 1) with preload, for both channels of each CCMR
    tim.ccmr1_output().write(|w| unsafe { w.bits(0x6868) });
    tim.ccmr2_output().write(|w| unsafe { w.bits(0x6868) });

    tim.ccr1.write(|w| unsafe { w.bits(0) });
    tim.ccr2.write(|w| unsafe { w.bits(0) });
    tim.ccr3.write(|w| unsafe { w.bits(0) });
    tim.ccr4.write(|w| unsafe { w.bits(0) });

    // CC1E..CC4E
    tim.ccer.write(|w| unsafe { w.bits(0x1111) });

    // ARPE, load registers, then start
    tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | (1 << 7)) });
    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1.modify(|_, w| w.cen().set_bit());

    (
        Tim4Channel { max_duty },
        Tim4Channel { max_duty },
        Tim4Channel { max_duty },
        Tim4Channel { max_duty },
    )
}

impl<const C: u8> ErrorType for Tim4Channel<C> {
    type Error = Infallible;
}

impl<const C: u8> SetDutyCycle for Tim4Channel<C> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        let tim = unsafe { &*pac::TIM4::ptr() };
        let duty = duty.min(self.max_duty) as u32;
        match C {
            1 => tim.ccr1.write(|w| unsafe { w.bits(duty) }),
            2 => tim.ccr2.write(|w| unsafe { w.bits(duty) }),
            3 => tim.ccr3.write(|w| unsafe { w.bits(duty) }),
            _ => tim.ccr4.write(|w| unsafe { w.bits(duty) }),
        }
        Ok(())
    }
}
