//! Error observer for failures inside the background worker

use super::error::LoggerError;
use super::log_entry::LogEntry;
use std::sync::Arc;

/// Callback receiving worker-side failures
///
/// Called from the worker thread. The entry is present when the failure
/// concerns a specific line (`SinkWriteFailed`).
pub type ErrorObserver = Arc<dyn Fn(&LoggerError, Option<&LogEntry>) + Send + Sync>;

/// Observer used when none is configured: reports on stderr
pub fn stderr_observer() -> ErrorObserver {
    Arc::new(report_to_stderr)
}

fn report_to_stderr(error: &LoggerError, entry: Option<&LogEntry>) {
    match entry {
        Some(entry) => eprintln!(
            "[LOGGER ERROR] {} (entry: [{}] {})",
            error,
            entry.severity(),
            entry.sanitized_message()
        ),
        None => eprintln!("[LOGGER ERROR] {}", error),
    }
}
