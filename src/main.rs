// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;
use core::f32::consts::PI;

use cortex_m::interrupt::{self as critical, Mutex};
use cortex_m::peripheral::{syst::SystClkSource, NVIC};
use cortex_m_rt::{entry, exception};
use log::{info, LevelFilter};
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use micromouse::config::Config;
use micromouse::control::{Pid, SpeedController, WallGains};
use micromouse::hw::pins::BoardPins;
use micromouse::hw::pwm::{self, Tim4Channel};
use micromouse::hw::{
    board, Board, Drivetrain, Encoder, HBridge, IrFrontEnd, Led, SerialLogger, Usart,
    WheelOdometry,
};
use micromouse::motion::{Direction, Motion, Ramp};
use micromouse::platform::sleep_ticks;
use micromouse::sensors::{Acquisition, SensorBank, SENSOR_CALIBRATION};

const CONFIG: Config = Config::DEFAULT;
const CONTROL_HZ: u32 = CONFIG.tick_frequency_hz as u32;
const CONTROL_DT: f32 = 1.0 / CONTROL_HZ as f32;

/// Acquisition phases per second (four phases per sensor).
const ACQUISITION_HZ: u32 = 16_000;
const PWM_HZ: u32 = 20_000;

const WHEEL_DIAMETER: f32 = 0.024;
const ENCODER_COUNTS_PER_REV: f32 = 4096.0;
const METERS_PER_COUNT: f32 = WHEEL_DIAMETER * PI / ENCODER_COUNTS_PER_REV;
const WHEEL_BASE: f32 = 0.072;

static SENSORS: SensorBank = SensorBank::new(SENSOR_CALIBRATION, CONFIG);

static ACQUISITION: Mutex<RefCell<Option<(Acquisition, IrFrontEnd)>>> =
    Mutex::new(RefCell::new(None));

type Motors = Drivetrain<Tim4Channel<1>, Tim4Channel<2>, Tim4Channel<3>, Tim4Channel<4>>;

static DRIVETRAIN: Mutex<RefCell<Option<Motors>>> = Mutex::new(RefCell::new(None));

/// TIM5 update interrupt at [`ACQUISITION_HZ`].
fn start_acquisition_timer(tim5: pac::TIM5, timer_hz: u32) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim5en().set_bit());

    tim5.psc.write(|w| unsafe { w.bits(0) });
    tim5.arr
        .write(|w| unsafe { w.bits(timer_hz / ACQUISITION_HZ - 1) });
    tim5.dier.modify(|_, w| w.uie().set_bit());
    tim5.cr1.modify(|_, w| w.cen().set_bit());

    unsafe { NVIC::unmask(pac::Interrupt::TIM5) };
}

#[interrupt]
fn TIM5() {
    let tim = unsafe { &*pac::TIM5::ptr() };
    tim.sr.modify(|_, w| w.uif().clear_bit());

    critical::free(|cs| {
        if let Some((acquisition, front_end)) = ACQUISITION.borrow(cs).borrow_mut().as_mut() {
            acquisition.step(front_end, &SENSORS);
        }
    });
}

#[exception]
fn SysTick() {
    critical::free(|cs| {
        if let Some(drivetrain) = DRIVETRAIN.borrow(cs).borrow_mut().as_mut() {
            drivetrain.tick(&SENSORS, CONTROL_DT);
        }
    });
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();
    let apb1_timer_hz = clocks.pclk1().raw() * 2;

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
    let _analog = pins.ir;
    let _encoder_pins = pins.encoder;
    let _motor_pins = pins.motors;

    // USART1 (DBG)
    let usart_cfg = serial::Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    SerialLogger::init(Usart::new(serial), LevelFilter::Info).unwrap();

    // Speed loop
    let mut controller = SpeedController::new(
        Pid::new(1.2, 8.0, 0.0).with_integral_limits(-0.5, 0.5),
        Pid::new(0.05, 0.5, 0.0).with_integral_limits(-0.3, 0.3),
        Ramp {
            acceleration: 5.0,
            deceleration: 5.0,
        },
        300.0,
        WallGains {
            side: 20.0,
            front: 10.0,
        },
    );
    controller.enable();
    board::install_controller(controller);

    // Wheels
    let (left_in1, left_in2, right_in1, right_in2) = pwm::tim4(dp.TIM4, apb1_timer_hz, PWM_HZ);
    let drivetrain = Drivetrain::new(
        Encoder::tim2(dp.TIM2),
        Encoder::tim3(dp.TIM3),
        WheelOdometry::new(METERS_PER_COUNT, WHEEL_BASE),
        HBridge::new(left_in1, left_in2).unwrap(),
        HBridge::new(right_in1, right_in2).unwrap(),
    );
    critical::free(|cs| {
        DRIVETRAIN.borrow(cs).replace(Some(drivetrain));
    });

    // IR sensors
    let front_end = IrFrontEnd::new(dp.ADC1, dp.ADC2, pins.emitters);
    critical::free(|cs| {
        ACQUISITION
            .borrow(cs)
            .replace(Some((Acquisition::new(), front_end)));
    });
    start_acquisition_timer(dp.TIM5, apb1_timer_hz);

    // Control tick
    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(clocks.sysclk().raw() / CONTROL_HZ - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    let mut motion = Motion::new(Board::new(Led::active_low(pins.led)), &SENSORS, CONFIG);

    // Let the acquisition fill every slot before trusting distances.
    sleep_ticks(motion.platform_mut(), 500);

    let battery = critical::free(|cs| {
        ACQUISITION
            .borrow(cs)
            .borrow()
            .as_ref()
            .map(|(_, front_end)| front_end.battery_voltage())
    });
    if let Some(volts) = battery {
        info!("battery {} mV", (volts * 1000.0) as u32);
    }

    motion.calibrate_side_sensors();
    motion.set_starting_position();

    // Bring-up run: left-hand wall follower.
    loop {
        let walls = motion.walls();
        let direction = if !walls.left {
            Direction::Left
        } else if !walls.front {
            Direction::Front
        } else if !walls.right {
            Direction::Right
        } else {
            Direction::Back
        };
        motion.move_towards(direction);
    }
}
