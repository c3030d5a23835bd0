//! Inbound commands to the relay controller.
//!
//! Produced by the [message parser](crate::protocol::parser) from radio
//! text and consumed by the [`RelayController`](super::service::RelayController).
//! Both the relay index and the on-duration are validated on construction,
//! so a `Command` that exists is always safe to apply.

use core::fmt;

/// A relay number proven to be below the bank size `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelayIndex<const N: usize>(usize);

impl<const N: usize> RelayIndex<N> {
    /// Returns `None` when `index >= N`.
    pub const fn new(index: usize) -> Option<Self> {
        if index < N { Some(Self(index)) } else { None }
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Every valid index, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..N).map(Self)
    }
}

impl<const N: usize> fmt::Display for RelayIndex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How long a relay stays ON, in milliseconds.  Always in `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OnDuration(u64);

impl OnDuration {
    /// Apply the clamp policy: a request of `0` or anything above
    /// `max_ms` becomes `max_ms`.  `max_ms` itself must be non-zero
    /// (guaranteed by [`RelayConfig::validate`](crate::config::RelayConfig::validate)).
    pub const fn clamped(requested_ms: u64, max_ms: u64) -> Self {
        if requested_ms == 0 || requested_ms > max_ms {
            Self(max_ms)
        } else {
            Self(requested_ms)
        }
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

/// The state change requested for one relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAction {
    /// Energise the relay and arm its auto-off timer.
    On(OnDuration),
    /// De-energise the relay.
    Off,
}

impl RelayAction {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On(_))
    }
}

/// Commands decoded from the radio protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<const N: usize> {
    /// `G.` — report the status line.
    GetStatus,
    /// `S.<index>.<0|1>.[<duration>.]` — switch one relay.
    SetRelay {
        index: RelayIndex<N>,
        action: RelayAction,
    },
}
