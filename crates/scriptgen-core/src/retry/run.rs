//! Retry loop: run a closure until success, a non-retryable failure, or the budget runs out.

use std::time::Duration;

use super::classify;
use super::error::CallError;
use super::hooks::{Notifier, Sleeper, ThreadSleeper, TracingNotifier};
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` at most `policy.max_retries()` times.
///
/// Returns the first success. A rate-limited failure is reported as a warning,
/// followed by a blocking wait before the next attempt. Any other failure is
/// reported as an error and ends the loop at once. `None` means the call did
/// not complete.
pub fn run_with_retry<T, F, S, N>(
    policy: &RetryPolicy,
    sleeper: &S,
    notifier: &N,
    mut f: F,
) -> Option<T>
where
    F: FnMut() -> Result<T, CallError>,
    S: Sleeper + ?Sized,
    N: Notifier + ?Sized,
{
    let mut retries_used = 0u32;
    while retries_used < policy.max_retries() {
        match f() {
            Ok(value) => return Some(value),
            Err(e) => match policy.decide(retries_used, classify::classify(&e)) {
                RetryDecision::RetryAfter(wait) => {
                    notifier.warning(&format!(
                        "Rate limit exceeded. Retrying in {} seconds...",
                        format_secs(wait)
                    ));
                    sleeper.sleep(wait);
                    retries_used += 1;
                }
                RetryDecision::NoRetry => {
                    notifier.error(&format!("An error occurred: {}", e));
                    return None;
                }
            },
        }
    }
    tracing::debug!(retries_used, "retry budget exhausted");
    None
}

fn format_secs(d: Duration) -> String {
    format!("{}", d.as_secs_f64())
}

/// Policy plus the wait and notification seams, built once and reused for every call.
pub struct RetryExecutor {
    policy: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
    notifier: Box<dyn Notifier>,
}

impl RetryExecutor {
    /// Executor that sleeps the thread and reports through tracing.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            sleeper: Box::new(ThreadSleeper),
            notifier: Box::new(TracingNotifier),
        }
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Execute one invocation under this executor's policy.
    pub fn execute<T, F>(&self, f: F) -> Option<T>
    where
        F: FnMut() -> Result<T, CallError>,
    {
        run_with_retry(&self.policy, self.sleeper.as_ref(), self.notifier.as_ref(), f)
    }
}
