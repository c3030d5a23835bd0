//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RelayController (domain)
//! ```
//!
//! Driven adapters (relay outputs, clock, event sinks) implement these
//! traits.  The [`RelayController`](super::service::RelayController)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive a relay output.
///
/// Infallible at this layer.  Adapters whose hardware can fail report the
/// failure themselves (see [`ActuatorError`](crate::error::ActuatorError))
/// rather than pushing it into the core.
pub trait RelayPort {
    /// Energise (`on = true`) or release relay `index`.
    fn write_relay(&mut self, index: usize, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  The value may wrap; consumers only
/// ever look at differences between readings.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
