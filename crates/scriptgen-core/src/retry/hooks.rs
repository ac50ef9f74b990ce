//! Seams the retry loop uses to wait and to report progress.

use std::time::Duration;

/// Blocking delay between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Human-readable progress sink (log file, terminal, UI notification).
pub trait Notifier {
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notifications to the tracing subscriber only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
