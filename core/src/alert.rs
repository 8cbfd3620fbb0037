//! User-visible failure notices.

/// Receives the one message shown to the user when a dispatched request fails.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrAlert;

impl AlertSink for StderrAlert {
    fn alert(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
