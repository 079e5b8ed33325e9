//! Log entry structure

use super::clock::Clock;
use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log record.
///
/// Entries are immutable once built: the timestamp is fixed by the producer
/// at creation time and the worker only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: String,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Utc>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            severity,
            message: message.into(),
        }
    }

    /// Build an entry stamped with the given clock's current time
    pub fn now(clock: &dyn Clock, severity: Severity, message: impl Into<String>) -> Self {
        Self::new(clock.now(), severity, message)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message with line breaks and tabs escaped, so one entry renders as one line
    pub fn sanitized_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use chrono::TimeZone;

    #[test]
    fn test_now_uses_clock() {
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        let clock = ManualClock::new(at);
        let entry = LogEntry::now(&clock, Severity::Warning, "disk almost full");

        assert_eq!(entry.timestamp(), at);
        assert_eq!(entry.severity(), Severity::Warning);
        assert_eq!(entry.message(), "disk almost full");
    }

    #[test]
    fn test_sanitize_leaves_original_untouched() {
        let entry = LogEntry::new(Utc::now(), Severity::Info, "line one\nline two\tend");

        assert_eq!(entry.sanitized_message(), "line one\\nline two\\tend");
        assert_eq!(entry.message(), "line one\nline two\tend");
    }
}
