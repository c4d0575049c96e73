// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART debug terminal and the `log` backend writing to it.
//!
//! Every record is written as `[LEVEL] message\r\n`, blocking until the bytes are out. The port is
//! lent out of its mutex for the write, so the control interrupts keep running. A record logged
//! while another one is being written is dropped.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::cell::RefCell;
use core::fmt;

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use nb::block;
use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::hw::record::write_record;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// `log` backend over the USART1 debug port.
pub struct SerialLogger {
    usart: Mutex<RefCell<Option<Usart<pac::USART1>>>>,
}

static LOGGER: SerialLogger = SerialLogger {
    usart: Mutex::new(RefCell::new(None)),
};

impl SerialLogger {
    /// Take ownership of `usart` and install the logger at `level`.
    pub fn init(usart: Usart<pac::USART1>, level: LevelFilter) -> Result<(), SetLoggerError> {
        interrupt::free(|cs| {
            LOGGER.usart.borrow(cs).replace(Some(usart));
        });
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let lent = interrupt::free(|cs| self.usart.borrow(cs).borrow_mut().take());
        if let Some(mut usart) = lent {
            let _ = write_record(&mut usart, record);
            interrupt::free(|cs| {
                self.usart.borrow(cs).replace(Some(usart));
            });
        }
    }

    fn flush(&self) {
        interrupt::free(|cs| {
            if let Some(usart) = self.usart.borrow(cs).borrow_mut().as_mut() {
                usart.flush();
            }
        });
    }
}
