//! Relay coil driver.
//!
//! One digital output per relay, through any `embedded-hal` [`OutputPin`].
//!
//! ## Polarity
//!
//! Most opto-isolated relay modules energise on a LOW input.  The driver
//! takes "energised or not" and translates to a pin level here, so
//! nothing above this layer ever deals with inverted logic.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pin HIGH energises the coil.
    ActiveHigh,
    /// Pin LOW energises the coil.
    ActiveLow,
}

impl Polarity {
    pub const fn from_active_low(active_low: bool) -> Self {
        if active_low { Self::ActiveLow } else { Self::ActiveHigh }
    }

    /// Pin level that puts the coil in the `energised` state.
    pub fn level(self, energised: bool) -> PinState {
        match self {
            Self::ActiveHigh => PinState::from(energised),
            Self::ActiveLow => PinState::from(!energised),
        }
    }
}

pub struct RelayDriver<P> {
    pin: P,
    polarity: Polarity,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Wrap `pin` and release the coil at once.  A freshly configured
    /// output idles LOW, which energises active-low boards.
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut driver = Self {
            pin,
            polarity,
            energised: false,
        };
        if let Err(e) = driver.set(false) {
            warn!("relay driver: initial release failed: {}", e);
        }
        driver
    }

    pub fn set(&mut self, energised: bool) -> Result<(), ActuatorError> {
        self.pin
            .set_state(self.polarity.level(energised))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.energised = energised;
        Ok(())
    }

    /// Last level successfully written.
    pub fn is_energised(&self) -> bool {
        self.energised
    }
}
