use anyhow::Result;
use std::time::Duration;

/// Classification of a failed call for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The service rejected the call because a request quota was exceeded (HTTP 429).
    RateLimited,
    /// Anything else. Never retried.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded exponential backoff without jitter.
///
/// The wait before retry `n` (0-based) is `backoff_factor * 2^n` seconds.
/// There is no cap other than `max_retries`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 1.0,
        }
    }
}

impl RetryPolicy {
    /// Build a policy. `backoff_factor` must be a positive, finite number of seconds.
    pub fn new(max_retries: u32, backoff_factor: f64) -> Result<Self> {
        if !backoff_factor.is_finite() || backoff_factor <= 0.0 {
            anyhow::bail!("backoff_factor must be a positive number, got {backoff_factor}");
        }
        Ok(Self {
            max_retries,
            backoff_factor,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    /// Wait before the next attempt after `retries_used` rate-limited attempts.
    /// Saturates at `Duration::MAX` once the exponent overflows an f64.
    pub fn backoff(&self, retries_used: u32) -> Duration {
        let exp = retries_used.min(i32::MAX as u32) as i32;
        let secs = self.backoff_factor * 2f64.powi(exp);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Decide what to do with a failure of the given kind.
    ///
    /// The attempt budget is enforced by the caller's loop, not here: a
    /// rate-limited final attempt still waits before the loop gives up.
    pub fn decide(&self, retries_used: u32, kind: ErrorKind) -> RetryDecision {
        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::RateLimited => RetryDecision::RetryAfter(self.backoff(retries_used)),
        }
    }
}
