//! Retry and backoff policy for external calls.
//!
//! Every call to the language model or the encyclopedia service can be routed
//! through [`RetryExecutor`]. Rate-limit failures are retried with exponential
//! backoff; every other failure is reported once and turned into `None`.

mod classify;
mod error;
mod hooks;
mod policy;
mod run;

pub use classify::{classify, classify_http_status, classify_message, RATE_LIMIT_MARKER};
pub use error::CallError;
pub use hooks::{Notifier, Sleeper, ThreadSleeper, TracingNotifier};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryExecutor};
