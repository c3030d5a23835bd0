//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::{AppEvent, SwitchCause};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { relay_count } => {
                info!("START | relays={}", relay_count);
            }
            AppEvent::RelaySwitched {
                index,
                on,
                duration_ms,
                cause,
            } => {
                let cause = match cause {
                    SwitchCause::Command => "cmd",
                    SwitchCause::TimerExpired => "timer",
                };
                let level = if *on { "ON" } else { "OFF" };
                match duration_ms {
                    Some(ms) => info!("RELAY | #{} {} for {}ms ({})", index, level, ms, cause),
                    None => info!("RELAY | #{} {} ({})", index, level, cause),
                }
            }
            AppEvent::CommandDebounced { index } => {
                debug!("RELAY | #{} unchanged", index);
            }
            AppEvent::MessageRejected(e) => {
                warn!("REJECT | {}", e);
            }
            AppEvent::StatusReported(status) => {
                debug!("STATUS | {}", status);
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | status={} | on={} | next_off={} | up={}s",
                    t.status,
                    t.on_count,
                    t.next_deadline_ms
                        .map_or(-1, |ms| i64::try_from(ms).unwrap_or(i64::MAX)),
                    t.uptime_ms / 1000,
                );
            }
        }
    }
}
