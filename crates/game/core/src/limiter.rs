//! Sliding-window recovery limiter with cooldown.

use crate::config::RecoveryConfig;
use crate::state::Tick;

/// Window and cooldown parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub window_ticks: u64,
    pub max_per_window: u32,
    pub cooldown_ticks: u64,
}

impl From<&RecoveryConfig> for RateLimitPolicy {
    fn from(config: &RecoveryConfig) -> Self {
        Self {
            window_ticks: u64::from(config.window_ticks.max(1)),
            max_per_window: config.max_recoveries.max(1),
            cooldown_ticks: u64::from(config.cooldown_ticks),
        }
    }
}

/// Per-item limiter bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateLimitState {
    pub window_start: Option<Tick>,
    pub count_in_window: u32,
    pub cooldown_until: Option<Tick>,
}

impl RateLimitState {
    /// Records an attempt at `now` and reports whether it may proceed.
    ///
    /// Denied only while a cooldown is pending. The attempt that fills the
    /// window is still allowed; it resets the window and starts the cooldown
    /// for the attempts after it.
    pub fn allow(&mut self, policy: &RateLimitPolicy, now: Tick) -> bool {
        if self.cooldown_until.is_some_and(|until| until > now) {
            return false;
        }

        let expired = self
            .window_start
            .is_none_or(|start| now.since(start) >= policy.window_ticks);
        if expired {
            self.window_start = Some(now);
            self.count_in_window = 0;
        }

        self.count_in_window += 1;

        if self.count_in_window >= policy.max_per_window {
            self.window_start = Some(now);
            self.count_in_window = 0;
            self.cooldown_until = Some(now + policy.cooldown_ticks);
        } else {
            self.cooldown_until = None;
        }
        true
    }

    pub fn in_cooldown(&self, now: Tick) -> bool {
        self.cooldown_until.is_some_and(|until| until > now)
    }
}
