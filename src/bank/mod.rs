//! Relay bank: per-relay state machine and auto-off timers.
//!
//! ```text
//!            SET-ON(d)               SET-ON(d') d' != d
//!   ┌─────┐ ───────────▶ ┌────────┐ ──────────┐
//!   │ OFF │              │ ON(t,d)│ ◀─────────┘ (rearm)
//!   └─────┘ ◀─────────── └────────┘
//!            SET-OFF / timer expiry
//! ```
//!
//! Each relay is one [`Relay`] record holding both its state and, while
//! ON, its timer, so state and timer can never disagree.  Every change
//! goes through [`RelayBank::apply`], which compares the request with the
//! recorded state and skips identical requests entirely: no pin write,
//! no timer rearm.  Radio retransmissions of the same command are
//! therefore harmless.

pub mod status;
pub mod timer;

use heapless::Vec;
use log::debug;

use crate::app::commands::{RelayAction, RelayIndex};
use crate::app::ports::RelayPort;

use status::{MAX_RELAYS, OFF_SYMBOL, ON_SYMBOL, StatusLine};
use timer::RelayTimer;

/// Recorded state of one relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relay {
    Off,
    On(RelayTimer),
}

impl Relay {
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On(_))
    }

    pub const fn timer(&self) -> Option<RelayTimer> {
        match self {
            Self::On(t) => Some(*t),
            Self::Off => None,
        }
    }

    pub const fn symbol(&self) -> char {
        if self.is_on() { ON_SYMBOL } else { OFF_SYMBOL }
    }

    /// Whether applying `action` would leave this record untouched.
    fn satisfies(&self, action: RelayAction) -> bool {
        match (self, action) {
            (Self::Off, RelayAction::Off) => true,
            (Self::On(timer), RelayAction::On(duration)) => timer.duration() == duration,
            _ => false,
        }
    }
}

/// Outcome of [`RelayBank::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The pin was written and the record updated.
    Switched,
    /// The request matched the recorded state; nothing happened.
    Unchanged,
}

/// `N` relays, all OFF at construction.
#[derive(Debug, Clone)]
pub struct RelayBank<const N: usize> {
    relays: [Relay; N],
}

impl<const N: usize> Default for RelayBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RelayBank<N> {
    const SIZE_OK: () = assert!(
        N > 0 && N <= MAX_RELAYS,
        "relay bank size must be 1..=MAX_RELAYS"
    );

    pub fn new() -> Self {
        let () = Self::SIZE_OK;
        Self {
            relays: [Relay::Off; N],
        }
    }

    pub fn relay(&self, index: RelayIndex<N>) -> Relay {
        self.relays[index.get()]
    }

    pub fn is_on(&self, index: RelayIndex<N>) -> bool {
        self.relay(index).is_on()
    }

    pub fn on_count(&self) -> usize {
        self.relays.iter().filter(|r| r.is_on()).count()
    }

    /// Apply one requested change, writing the pin only if the recorded
    /// state (and, for ON, the duration) differs.  Turning ON always
    /// arms a fresh timer starting at `now`.
    pub fn apply(
        &mut self,
        index: RelayIndex<N>,
        action: RelayAction,
        now: u64,
        hw: &mut impl RelayPort,
    ) -> Transition {
        let slot = &mut self.relays[index.get()];
        if slot.satisfies(action) {
            debug!("relay {}: {:?} already in effect", index, action);
            return Transition::Unchanged;
        }

        hw.write_relay(index.get(), action.is_on());
        *slot = match action {
            RelayAction::On(duration) => Relay::On(RelayTimer::arm(now, duration)),
            RelayAction::Off => Relay::Off,
        };
        Transition::Switched
    }

    /// Force OFF every relay whose timer has run out.  OFF relays are
    /// skipped.  Returns the relays switched off by this sweep.
    pub fn sweep(&mut self, now: u64, hw: &mut impl RelayPort) -> Vec<RelayIndex<N>, N> {
        let mut expired = Vec::new();
        for index in RelayIndex::all() {
            let Relay::On(timer) = self.relay(index) else {
                continue;
            };
            if timer.is_expired(now)
                && self.apply(index, RelayAction::Off, now, hw) == Transition::Switched
            {
                // At most N entries; cannot overflow.
                let _ = expired.push(index);
            }
        }
        expired
    }

    /// Milliseconds left on `index`'s timer, `None` while it is OFF.
    pub fn remaining_ms(&self, index: RelayIndex<N>, now: u64) -> Option<u64> {
        self.relay(index).timer().map(|t| t.remaining(now))
    }

    /// Milliseconds until the earliest pending auto-off, if any relay is ON.
    pub fn next_expiry(&self, now: u64) -> Option<u64> {
        self.relays
            .iter()
            .filter_map(|r| r.timer().map(|t| t.remaining(now)))
            .min()
    }

    /// Current status line.  Pure read.
    pub fn render(&self) -> StatusLine {
        status::render(&self.relays)
    }
}
