//! Status line rendering.
//!
//! One character per relay, in index order, no separators:
//! `"00100000"` means relay 2 of 8 is ON.

use heapless::String;

use super::Relay;

/// Symbol reported for an energised relay.
pub const ON_SYMBOL: char = '1';
/// Symbol reported for a released relay.
pub const OFF_SYMBOL: char = '0';

/// Largest bank the status line (and the radio payload) can describe.
pub const MAX_RELAYS: usize = 32;

/// Fixed-capacity status text; its length always equals the bank size.
pub type StatusLine = String<MAX_RELAYS>;

pub(super) fn render(relays: &[Relay]) -> StatusLine {
    let mut line = StatusLine::new();
    for relay in relays {
        // Cannot overflow: RelayBank rejects N > MAX_RELAYS at compile time.
        let _ = line.push(relay.symbol());
    }
    line
}
