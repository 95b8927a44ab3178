//! Bounded, timed delivery of one reading.

use std::time::Duration;

use agv_core::DeliveryConfig;
use rand::Rng;
use tracing::warn;

use crate::{DataSink, Reading, SinkError, SinkResult};

/// Per-attempt timeout plus capped exponential backoff.
///
/// The delay before retry `n` (0-based) is `min(base * 2^n, max)` plus a
/// uniform jitter in `[0, base / 2)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per reading, including the first.  Never 0.
    pub max_attempts:    u32,
    pub attempt_timeout: Duration,
    pub backoff_base:    Duration,
    pub backoff_max:     Duration,
}

impl RetryPolicy {
    pub fn from_config(cfg: &DeliveryConfig) -> Self {
        Self {
            max_attempts:    cfg.max_attempts.max(1),
            attempt_timeout: Duration::from_millis(cfg.attempt_timeout_ms),
            backoff_base:    Duration::from_millis(cfg.backoff_base_ms),
            backoff_max:     Duration::from_millis(cfg.backoff_max_ms),
        }
    }

    /// One attempt, no retry.
    pub fn single(attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: 1,
            attempt_timeout,
            backoff_base: Duration::ZERO,
            backoff_max:  Duration::ZERO,
        }
    }

    /// Capped exponential backoff before retry `n`, without jitter.
    pub fn backoff(&self, n: u32) -> Duration {
        let factor = 2u32.saturating_pow(n);
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(self.backoff_max)
            .min(self.backoff_max)
    }

    fn jitter(&self) -> Duration {
        let half = self.backoff_base / 2;
        if half.is_zero() {
            return Duration::ZERO;
        }
        rand::thread_rng().gen_range(Duration::ZERO..half)
    }

    /// Write `reading`, retrying per this policy.
    ///
    /// Returns the number of attempts used on success, or the last error
    /// once every attempt has failed or timed out.
    pub async fn deliver(&self, sink: &dyn DataSink, reading: &Reading) -> SinkResult<u32> {
        let mut attempt = 1;
        loop {
            let err = match tokio::time::timeout(self.attempt_timeout, sink.write(reading)).await {
                Ok(Ok(()))  => return Ok(attempt),
                Ok(Err(e))  => e,
                Err(_)      => SinkError::Timeout(self.attempt_timeout),
            };
            if attempt >= self.max_attempts {
                return Err(err);
            }

            let delay = self.backoff(attempt - 1) + self.jitter();
            warn!(
                sensor = %reading.sensor,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "sink write failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DeliveryConfig::default())
    }
}
