//! Transport abstraction — the byte-oriented radio link.
//!
//! Concrete implementation: the transparent UART radio modem
//! ([`UartRadio`](crate::adapters::uart_radio)).
//!
//! Delivery, acknowledgement and retries belong to the radio side; the
//! controller only sees bytes in and bytes out.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;
}
