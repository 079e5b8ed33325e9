//! Sink trait for log output destinations
//!
//! The logger only writes to a sink; opening and closing the underlying
//! stream stays with whoever built the sink.

use super::error::Result;
use super::log_entry::LogEntry;

pub trait Sink: Send {
    /// Write one already-formatted line (without trailing newline)
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Write the line rendered from `entry`
    ///
    /// This is what the worker calls. Sinks that route by severity override
    /// it; the rest only implement [`write_line`](Sink::write_line).
    fn write_entry(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        let _ = entry;
        self.write_line(line)
    }

    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn write_entry(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        (**self).write_entry(entry, line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
