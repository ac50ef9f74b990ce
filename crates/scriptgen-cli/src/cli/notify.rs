//! Terminal notification sink for retry progress.

use scriptgen_core::retry::Notifier;

/// Prints to stderr and mirrors to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
        eprintln!("warning: {message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
        eprintln!("error: {message}");
    }
}
