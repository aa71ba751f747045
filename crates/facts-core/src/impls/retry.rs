//! Retry policy: decides how often and how long to back off on transaction conflicts.

use std::time::Duration;

use rand::Rng;

/// Retry policy for conflicting transactions.
///
/// Exponential backoff: delay = base_delay * multiplier^(attempts - 1), capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,

    /// Delay after the first conflict.
    pub base_delay: Duration,

    /// Backoff multiplier.
    pub multiplier: f64,

    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            ..Self::default()
        }
    }

    /// Delay before the next attempt.
    ///
    /// # Arguments
    /// * `attempts` - Number of attempts already made (1-indexed).
    ///
    /// Example with base_delay=1ms, multiplier=2.0:
    /// - attempt 1 (first conflict): 1ms
    /// - attempt 2: 2ms
    /// - attempt 3: 4ms
    pub fn next_delay(&self, attempts: u32) -> Duration {
        let base_secs = self.base_delay.as_secs_f64();
        let delay_secs = base_secs * self.multiplier.powi(attempts.saturating_sub(1) as i32);
        Duration::from_secs_f64(delay_secs.min(self.max_delay.as_secs_f64()))
    }

    /// `next_delay` with random jitter in `[delay / 2, delay]`.
    ///
    /// Conflicting writers that back off by the same amount would collide again.
    pub fn jittered_delay(&self, attempts: u32) -> Duration {
        let delay = self.next_delay(attempts);
        if delay.is_zero() {
            return delay;
        }
        let factor = rand::thread_rng().gen_range(0.5..=1.0);
        delay.mul_f64(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(1),
            multiplier: 2.0,
            max_delay: Duration::from_millis(100),
        }
    }
}
