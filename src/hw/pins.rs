// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 micromouse board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Analog},
    pac,
    prelude::*,
};

use crate::hw::BoardPin;

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub led: BoardPin<'D', 9>,
    pub usart1: Usart1Pins,
    pub emitters: EmitterPins,
    pub ir: IrPins,
    pub encoder: EncoderPins,
    pub motors: MotorPins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// IR emitter drive lines, one per sensor
pub struct EmitterPins {
    pub side_left: BoardPin<'E', 2>,
    pub side_right: BoardPin<'E', 3>,
    pub front_left: BoardPin<'E', 5>,
    pub front_right: BoardPin<'E', 6>,
}

/// Phototransistor and battery divider inputs
pub struct IrPins {
    pub side_left: gpioc::PC0<Analog>,   // ADC1_IN10
    pub side_right: gpioc::PC1<Analog>,  // ADC1_IN11
    pub front_left: gpioc::PC2<Analog>,  // ADC1_IN12
    pub front_right: gpioc::PC3<Analog>, // ADC1_IN13
    pub battery: gpiob::PB1<Analog>,     // ADC2_IN9
}

/// TIM2 (left) / TIM3 (right) quadrature encoder inputs
pub struct EncoderPins {
    pub tim2_ch1: gpioa::PA0<Alternate<1>>,
    pub tim2_ch2: gpioa::PA1<Alternate<1>>,

    pub tim3_ch1: gpioa::PA6<Alternate<2>>,
    pub tim3_ch2: gpioa::PA7<Alternate<2>>,
}

/// H-bridge inputs on TIM4
pub struct MotorPins {
    pub left_in1: gpiod::PD12<Alternate<2>>,  // TIM4_CH1
    pub left_in2: gpiod::PD13<Alternate<2>>,  // TIM4_CH2
    pub right_in1: gpiod::PD14<Alternate<2>>, // TIM4_CH3
    pub right_in2: gpiod::PD15<Alternate<2>>, // TIM4_CH4
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            led: BoardPin::low(gpiod.pd9),

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            emitters: EmitterPins {
                side_left: BoardPin::low(gpioe.pe2),
                side_right: BoardPin::low(gpioe.pe3),
                front_left: BoardPin::low(gpioe.pe5),
                front_right: BoardPin::low(gpioe.pe6),
            },

            ir: IrPins {
                side_left: gpioc.pc0.into_analog(),
                side_right: gpioc.pc1.into_analog(),
                front_left: gpioc.pc2.into_analog(),
                front_right: gpioc.pc3.into_analog(),
                battery: gpiob.pb1.into_analog(),
            },

            encoder: EncoderPins {
                tim2_ch1: gpioa.pa0.into_alternate::<1>(),
                tim2_ch2: gpioa.pa1.into_alternate::<1>(),
                tim3_ch1: gpioa.pa6.into_alternate::<2>(),
                tim3_ch2: gpioa.pa7.into_alternate::<2>(),
            },

            motors: MotorPins {
                left_in1: gpiod.pd12.into_alternate::<2>(),
                left_in2: gpiod.pd13.into_alternate::<2>(),
                right_in1: gpiod.pd14.into_alternate::<2>(),
                right_in2: gpiod.pd15.into_alternate::<2>(),
            },
        }
    }
}
