//! Hardware adapter — bridges relay drivers to the domain [`RelayPort`].
//!
//! Owns one [`RelayDriver`] per relay.  This is the only place pin write
//! failures are seen; they are logged and counted here and never reach
//! the controller, whose port is infallible.

use embedded_hal::digital::OutputPin;
use log::{error, warn};

use crate::app::ports::RelayPort;
use crate::drivers::relay::{Polarity, RelayDriver};

/// Concrete adapter for a board of `N` relays.
pub struct RelayBoard<P, const N: usize> {
    relays: [RelayDriver<P>; N],
    write_failures: u32,
}

impl<P: OutputPin, const N: usize> RelayBoard<P, N> {
    /// `pins[i]` drives relay `i`.
    pub fn new(pins: [P; N], polarity: Polarity) -> Self {
        Self {
            relays: pins.map(|pin| RelayDriver::new(pin, polarity)),
            write_failures: 0,
        }
    }

    /// Pin writes that failed since boot.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    pub fn is_energised(&self, index: usize) -> Option<bool> {
        self.relays.get(index).map(RelayDriver::is_energised)
    }
}

impl<P: OutputPin, const N: usize> RelayPort for RelayBoard<P, N> {
    fn write_relay(&mut self, index: usize, on: bool) {
        let Some(relay) = self.relays.get_mut(index) else {
            error!("relay board: no relay {} (board has {})", index, N);
            return;
        };
        if let Err(e) = relay.set(on) {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("relay {}: {} (on={})", index, e, on);
        }
    }
}
