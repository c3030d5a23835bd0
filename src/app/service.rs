//! Relay controller — the hexagonal core.
//!
//! [`RelayController`] owns the relay bank and the configuration.  The
//! firmware entry point creates exactly one and passes ports in at every
//! call site, making the whole controller testable with mock adapters.
//!
//! ```text
//!   radio text ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                  │      RelayController       │
//!   RelayPort  ◀── │  Parser · Bank · Timers    │ ──▶ status line
//!                  └───────────────────────────┘
//! ```
//!
//! One control cycle is: [`tick`](RelayController::tick) (timer sweep),
//! then zero or more [`handle_message`](RelayController::handle_message)
//! calls, then transmitting whatever status line the replies carry.

use log::{info, warn};

use crate::bank::status::StatusLine;
use crate::bank::{RelayBank, Transition};
use crate::config::RelayConfig;
use crate::error::{ConfigError, ParseError};
use crate::protocol::parser::parse_message;

use super::commands::{Command, RelayAction};
use super::events::{AppEvent, SwitchCause, TelemetryData};
use super::ports::{EventSink, RelayPort};

/// Result of an accepted message.  Every variant asks the transport to
/// send back the enclosed status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `G.`
    Status(StatusLine),
    /// `S.` — the relay either switched or was already as requested.
    Relay {
        transition: Transition,
        status: StatusLine,
    },
}

impl Reply {
    /// The status line to transmit.
    pub fn status(&self) -> &StatusLine {
        match self {
            Self::Status(status) | Self::Relay { status, .. } => status,
        }
    }
}

/// Controller for a bank of `N` relays.
pub struct RelayController<const N: usize> {
    bank: RelayBank<N>,
    config: RelayConfig,
    boot_ms: u64,
}

impl<const N: usize> RelayController<N> {
    /// Validate `config` and build a controller with every relay OFF.
    ///
    /// Does **not** touch the hardware — call [`start`](Self::start) next.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bank: RelayBank::new(),
            config,
            boot_ms: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every relay output OFF so the hardware matches the bank.
    pub fn start(&mut self, now: u64, hw: &mut impl RelayPort, sink: &mut impl EventSink) {
        for index in 0..N {
            hw.write_relay(index, false);
        }
        self.boot_ms = now;
        sink.emit(&AppEvent::Started { relay_count: N });
        info!(
            "RelayController started: {} relays, max on {} ms",
            N, self.config.max_on_duration_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run the timer sweep for this cycle.  Returns how many relays
    /// were forced OFF.
    pub fn tick(&mut self, now: u64, hw: &mut impl RelayPort, sink: &mut impl EventSink) -> usize {
        let expired = self.bank.sweep(now, hw);
        for index in &expired {
            info!("relay {}: auto-off", index);
            sink.emit(&AppEvent::RelaySwitched {
                index: index.get(),
                on: false,
                duration_ms: None,
                cause: SwitchCause::TimerExpired,
            });
        }
        expired.len()
    }

    // ── Command handling ──────────────────────────────────────

    /// Decode and apply one radio message.
    ///
    /// A malformed message changes nothing and is reported to `sink`;
    /// the controller keeps running either way.
    pub fn handle_message(
        &mut self,
        raw: &str,
        now: u64,
        hw: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) -> Result<Reply, ParseError> {
        match parse_message::<N>(raw, self.config.max_on_duration_ms) {
            Ok(command) => Ok(self.handle_command(command, now, hw, sink)),
            Err(e) => {
                warn!("rejected message {:?}: {}", raw, e);
                sink.emit(&AppEvent::MessageRejected(e));
                Err(e)
            }
        }
    }

    /// Apply an already-decoded command.
    pub fn handle_command(
        &mut self,
        command: Command<N>,
        now: u64,
        hw: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) -> Reply {
        let reply = match command {
            Command::GetStatus => Reply::Status(self.status()),
            Command::SetRelay { index, action } => {
                let transition = self.bank.apply(index, action, now, hw);
                match transition {
                    Transition::Switched => {
                        let duration_ms = match action {
                            RelayAction::On(d) => Some(d.as_millis()),
                            RelayAction::Off => None,
                        };
                        info!("relay {}: {:?}", index, action);
                        sink.emit(&AppEvent::RelaySwitched {
                            index: index.get(),
                            on: action.is_on(),
                            duration_ms,
                            cause: SwitchCause::Command,
                        });
                    }
                    Transition::Unchanged => {
                        sink.emit(&AppEvent::CommandDebounced { index: index.get() });
                    }
                }
                Reply::Relay {
                    transition,
                    status: self.status(),
                }
            }
        };
        sink.emit(&AppEvent::StatusReported(reply.status().clone()));
        reply
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current status line.
    pub fn status(&self) -> StatusLine {
        self.bank.render()
    }

    /// Milliseconds until the next auto-off, if any relay is ON.  The
    /// control loop must not idle longer than this.
    pub fn next_deadline(&self, now: u64) -> Option<u64> {
        self.bank.next_expiry(now)
    }

    pub fn telemetry(&self, now: u64) -> TelemetryData {
        TelemetryData {
            status: self.status(),
            on_count: self.bank.on_count(),
            next_deadline_ms: self.next_deadline(now),
            uptime_ms: now.wrapping_sub(self.boot_ms),
        }
    }
}
