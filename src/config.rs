//! System configuration parameters
//!
//! All tunable parameters for the RelayBank controller.  Values can be
//! overridden at build time with a JSON document (see [`RelayConfig::from_json`]).
//! Relay state itself is never persisted.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound accepted for `max_on_duration_ms` (24 h).
pub const MAX_ON_DURATION_LIMIT_MS: u64 = 86_400_000;

/// Baud rates supported by the transparent UART radio modems we ship with.
pub const SUPPORTED_BAUD_RATES: [u32; 5] = [1200, 2400, 4800, 9600, 19_200];

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    // --- Relays ---
    /// Longest time any relay may stay ON before it is forced OFF (ms).
    /// Requested durations of 0 or above this value are replaced by it.
    pub max_on_duration_ms: u64,
    /// Relay board inputs are active-low (opto-isolated modules).
    pub relay_active_low: bool,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,

    // --- Radio ---
    /// UART baud rate of the radio modem
    pub uart_baud: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            // Relays
            max_on_duration_ms: 3_600_000, // 1 h
            relay_active_low: true,

            // Timing
            control_loop_interval_ms: 50, // 20 Hz
            telemetry_interval_secs: 60,  // 1/min

            // Radio
            uart_baud: 9600,
        }
    }
}

impl RelayConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_on_duration_ms == 0 || self.max_on_duration_ms > MAX_ON_DURATION_LIMIT_MS {
            return Err(ConfigError::ValidationFailed(
                "max_on_duration_ms must be 1–86400000",
            ));
        }
        if !(1..=1000).contains(&self.control_loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be 1–1000",
            ));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_secs must be > 0",
            ));
        }
        if !SUPPORTED_BAUD_RATES.contains(&self.uart_baud) {
            return Err(ConfigError::ValidationFailed("uart_baud is not supported"));
        }
        Ok(())
    }

    /// Deserialize a JSON config document and validate it.
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
