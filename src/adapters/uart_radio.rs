//! Transparent UART radio modem adapter (ESP-IDF only).
//!
//! Modules such as HC-12 or APC220 present the radio link as a plain
//! serial port: whatever the gateway sends arrives as bytes on RX, and
//! bytes written to TX are broadcast back.  Addressing, acknowledgement
//! and retries are handled inside the modem.

use esp_idf_hal::delay::{BLOCK, NON_BLOCK};
use esp_idf_hal::uart::UartDriver;
use esp_idf_svc::sys::EspError;
use log::info;

use crate::protocol::transport::Transport;

pub struct UartRadio<'d> {
    uart: UartDriver<'d>,
}

impl<'d> UartRadio<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        info!("UartRadio: ready");
        Self { uart }
    }
}

impl Transport for UartRadio<'_> {
    type Error = EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, NON_BLOCK)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
        self.uart.write(data)
    }

    fn flush(&mut self) -> Result<(), EspError> {
        self.uart.wait_tx_done(BLOCK)
    }

    fn available(&self) -> bool {
        self.uart.remaining_read().is_ok_and(|n| n > 0)
    }
}
