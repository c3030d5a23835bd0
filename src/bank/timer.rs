//! Per-relay auto-off timer.
//!
//! Timestamps come from a free-running millisecond counter that may wrap.
//! All comparisons use the elapsed difference (`now - started_at` in
//! wrapping arithmetic), never the absolute values, so a timer armed just
//! before the counter wraps still expires on time.

use crate::app::commands::OnDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayTimer {
    started_at: u64,
    duration: OnDuration,
}

impl RelayTimer {
    pub const fn arm(now: u64, duration: OnDuration) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    pub const fn duration(&self) -> OnDuration {
        self.duration
    }

    /// Milliseconds since the timer was armed.
    pub const fn elapsed(&self, now: u64) -> u64 {
        now.wrapping_sub(self.started_at)
    }

    pub const fn is_expired(&self, now: u64) -> bool {
        self.elapsed(now) >= self.duration.as_millis()
    }

    /// Milliseconds left before expiry; `0` once expired.
    pub const fn remaining(&self, now: u64) -> u64 {
        self.duration.as_millis().saturating_sub(self.elapsed(now))
    }
}
