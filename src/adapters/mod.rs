//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                |
//! |----------------|--------------|----------------------------|
//! | `hardware`     | RelayPort    | relay driver GPIOs         |
//! | `log_sink`     | EventSink    | Serial log output          |
//! | `time`         | ClockPort    | ESP32 system timer         |
//! | `uart_radio`   | Transport    | UART radio modem (ESP-IDF) |

pub mod hardware;
pub mod log_sink;
pub mod time;
#[cfg(feature = "espidf")]
pub mod uart_radio;
