//! UART link to the fingerprint unit.
//!
//! Implements [`SerialLink`] over an ESP-IDF `UartDriver`.  Reads never
//! block; writes append `\r\n` the way the unit's firmware expects.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::uart::UartDriver;
use log::warn;

use crate::app::ports::SerialLink;

pub struct UartLink {
    uart: UartDriver<'static>,
}

impl UartLink {
    pub fn new(uart: UartDriver<'static>) -> Self {
        Self { uart }
    }
}

impl SerialLink for UartLink {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                warn!("uart: read failed: {e}");
                None
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        let result = self
            .uart
            .write(line.as_bytes())
            .and_then(|_| self.uart.write(b"\r\n"));
        if let Err(e) = result {
            warn!("uart: write of \"{line}\" failed: {e}");
        }
    }
}
