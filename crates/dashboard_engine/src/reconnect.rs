//! Exponential-backoff reconnection policy.
//!
//! After a close, a transport error or a failed handshake the manager waits
//! the current delay before trying again. The delay grows by `multiplier`
//! up to `max_delay_ms` and goes back to the initial value as soon as a
//! connection opens.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lower bound applied to every delay, so a zero from the config cannot turn
/// into a busy reconnect loop.
pub const MIN_DELAY_MS: u64 = 100;

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectPolicy {
    /// Delay before the first reconnection attempt.
    pub initial_delay_ms: u64,
    /// Upper bound on the delay between attempts.
    pub max_delay_ms: u64,
    /// Factor by which the delay grows after each failure; values below 1.0
    /// are treated as 1.0.
    pub multiplier: f64,
    /// Consecutive attempts allowed before giving up; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1_000,
            max_delay_ms: 30_000,
            multiplier: 2.0,
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms.max(MIN_DELAY_MS)).min(self.max_delay())
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms.max(MIN_DELAY_MS))
    }

    /// Calculate the next backoff delay, clamped to `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let multiplier = if self.multiplier.is_finite() {
            self.multiplier.max(1.0)
        } else {
            1.0
        };
        let next_ms = (current.as_millis() as f64 * multiplier) as u64;
        Duration::from_millis(next_ms.max(MIN_DELAY_MS)).min(self.max_delay())
    }
}

/// Attempt counter and current delay for one connection manager.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: ReconnectPolicy,
    delay: Duration,
    attempts: u32,
}

impl Backoff {
    pub fn new(policy: ReconnectPolicy) -> Self {
        let delay = policy.initial_delay();
        Self {
            policy,
            delay,
            attempts: 0,
        }
    }

    /// Forget past failures after a successful open.
    pub fn reset(&mut self) {
        self.delay = self.policy.initial_delay();
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Number and delay of the next attempt, or `None` once the policy is
    /// exhausted.
    pub fn next_attempt(&mut self) -> Option<(u32, Duration)> {
        if self
            .policy
            .max_attempts
            .is_some_and(|max| self.attempts >= max)
        {
            return None;
        }
        self.attempts += 1;
        let delay = self.delay;
        self.delay = self.policy.next_delay(delay);
        Some((self.attempts, delay))
    }
}
