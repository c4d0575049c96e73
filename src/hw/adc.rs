// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC support for the IR sensors and the battery divider, using direct PAC register access.
//!
//! ADC1 converts the four phototransistors as an injected group started by software; results land
//! in JDR1..JDR4 in rank order. ADC2 converts the battery divider as a single regular conversion.
//! Nothing here waits for a conversion to finish: the acquisition phases are spaced further apart
//! than a conversion takes.

use stm32f7xx_hal::pac;

/// Generic ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

/// Sample time code for 56 cycles.
const SAMPLE_56_CYCLES: u32 = 0b011;

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_basic_adc(adc: &pac::adc1::RegisterBlock) {
    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    // Power on
    adc.cr2.modify(|_, w| w.adon().set_bit());
}

/// Set the sample time of `channel` (0..=18).
fn set_sample_time(adc: &pac::adc1::RegisterBlock, channel: u8, code: u32) {
    if channel <= 9 {
        let shift = 3 * channel as u32;
        adc.smpr2
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (code << shift)) });
    } else {
        let shift = 3 * (channel as u32 - 10);
        adc.smpr1
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (code << shift)) });
    }
}

impl Adc<pac::ADC1> {
    /// Create ADC1 with `channels` as the four-rank injected sequence.
    pub fn adc1(adc1: pac::ADC1, channels: [u8; 4]) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_basic_adc(&adc1);

        // Scan the whole injected group on each trigger
        adc1.cr1.modify(|_, w| w.scan().set_bit());

        // JL = 3 (four conversions), JSQ1..JSQ4 in rank order
        let jsqr = (3 << 20)
            | (channels[3] as u32 & 0x1F) << 15
            | (channels[2] as u32 & 0x1F) << 10
            | (channels[1] as u32 & 0x1F) << 5
            | (channels[0] as u32 & 0x1F);
        adc1.jsqr.write(|w| unsafe { w.bits(jsqr) });

        for ch in channels {
            set_sample_time(&adc1, ch, SAMPLE_56_CYCLES);
        }

        Self { adc: adc1 }
    }

    /// Start the injected group.
    #[inline]
    pub fn start_injected(&mut self) {
        self.adc.cr2.modify(|_, w| w.jswstart().set_bit());
    }

    /// Result of injected rank `rank` (0..=3) from the last group conversion.
    pub fn injected(&self, rank: usize) -> u16 {
        let bits = match rank {
            0 => self.adc.jdr1.read().bits(),
            1 => self.adc.jdr2.read().bits(),
            2 => self.adc.jdr3.read().bits(),
            _ => self.adc.jdr4.read().bits(),
        };
        (bits & 0xFFFF) as u16
    }
}

impl Adc<pac::ADC2> {
    /// Create ADC2 for single regular conversions of `channel`.
    pub fn adc2(adc2: pac::ADC2, channel: u8) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc2en().set_bit());

        configure_common();
        init_basic_adc(&adc2);

        // Sequence length = 1 conversion
        adc2.sqr1.modify(|_, w| w.l().bits(0));
        adc2.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });
        set_sample_time(&adc2, channel, SAMPLE_56_CYCLES);

        Self { adc: adc2 }
    }

    /// Start the regular conversion without waiting for it.
    #[inline]
    pub fn start(&mut self) {
        self.adc.cr2.modify(|_, w| w.swstart().set_bit());
    }

    /// Result of the last regular conversion.
    #[inline]
    pub fn last(&self) -> u16 {
        self.adc.dr.read().data().bits() as u16
    }
}
