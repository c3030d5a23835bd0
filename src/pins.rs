//! GPIO assignments for the RelayBank main board.
//!
//! Single source of truth — the entry point builds every driver from
//! this table rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Relay outputs (8-channel opto-isolated module)
// ---------------------------------------------------------------------------

/// `RELAY_GPIOS[i]` drives relay `i`.
pub const RELAY_GPIOS: [i32; 8] = [4, 5, 6, 7, 15, 16, 17, 18];

/// Number of relays on the board.
pub const RELAY_COUNT: usize = RELAY_GPIOS.len();

// ---------------------------------------------------------------------------
// Radio modem (UART1)
// ---------------------------------------------------------------------------

pub const RADIO_UART_TX_GPIO: i32 = 10;
pub const RADIO_UART_RX_GPIO: i32 = 11;
