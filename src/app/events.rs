//! Outbound application events.
//!
//! The [`RelayController`](super::service::RelayController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::bank::status::StatusLine;
use crate::error::ParseError;

/// Why a relay changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCause {
    /// An accepted `S.` message.
    Command,
    /// The auto-off timer ran out.
    TimerExpired,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has driven every relay OFF and is ready.
    Started { relay_count: usize },

    /// A relay output was written.
    RelaySwitched {
        index: usize,
        on: bool,
        /// Armed duration for ON switches.
        duration_ms: Option<u64>,
        cause: SwitchCause,
    },

    /// A SET command matched the recorded state and was skipped.
    CommandDebounced { index: usize },

    /// A message failed to parse and was discarded.
    MessageRejected(ParseError),

    /// A status line was produced in reply to an accepted message.
    StatusReported(StatusLine),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryData {
    pub status: StatusLine,
    pub on_count: usize,
    /// Milliseconds to the nearest auto-off; `None` when all relays are OFF.
    pub next_deadline_ms: Option<u64>,
    pub uptime_ms: u64,
}
