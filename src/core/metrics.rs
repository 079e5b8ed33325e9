//! Logger metrics for observability
//!
//! Counters for monitoring the logger: what was admitted, what reached the
//! sink, what failed, and how often producers hit backpressure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use async_line_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_submitted();
/// metrics.record_submitted();
/// metrics.record_written();
///
/// assert_eq!(metrics.pending(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries admitted into the queue
    submitted: AtomicU64,

    /// Entries the sink accepted
    written: AtomicU64,

    /// Entries the sink rejected
    write_failures: AtomicU64,

    /// Failed sink flushes
    flush_failures: AtomicU64,

    /// Submits that found the queue full and had to wait
    blocked_submits: AtomicU64,

    /// Entries discarded by the severity filter
    filtered: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
            blocked_submits: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Acquire)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Acquire)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Acquire)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocked_submits(&self) -> u64 {
        self.blocked_submits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    /// Entries admitted but not yet handed to the sink
    pub fn pending(&self) -> u64 {
        let handled = self.written() + self.write_failures();
        self.submitted().saturating_sub(handled)
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::AcqRel)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::AcqRel)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::AcqRel)
    }

    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_blocked(&self) -> u64 {
        self.blocked_submits.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of handled entries the sink rejected, as a percentage
    ///
    /// Returns 0.0 if nothing has been handled yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            written: AtomicU64::new(self.written()),
            write_failures: AtomicU64::new(self.write_failures()),
            flush_failures: AtomicU64::new(self.flush_failures()),
            blocked_submits: AtomicU64::new(self.blocked_submits()),
            filtered: AtomicU64::new(self.filtered()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.submitted(), 0);
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.blocked_submits(), 0);
        assert_eq!(metrics.pending(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_submitted(), 0);
        assert_eq!(metrics.record_submitted(), 1);
        assert_eq!(metrics.submitted(), 2);
    }

    #[test]
    fn test_pending_counts_failures_as_handled() {
        let metrics = LoggerMetrics::new();
        for _ in 0..3 {
            metrics.record_submitted();
        }
        metrics.record_written();
        metrics.record_write_failure();
        assert_eq!(metrics.pending(), 1);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..9 {
            metrics.record_written();
        }
        metrics.record_write_failure();

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();

        let snapshot = metrics.clone();
        metrics.record_written();

        assert_eq!(metrics.written(), 2);
        assert_eq!(snapshot.written(), 1);
    }
}
