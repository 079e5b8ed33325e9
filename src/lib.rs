//! # Async Line Logger
//!
//! A bounded asynchronous logger: any number of producer threads submit
//! entries, one background worker writes them to a sink in admission order.
//!
//! ## Features
//!
//! - **Backpressure**: a full queue blocks the producer, nothing is dropped
//! - **Non-lossy shutdown**: `stop()` returns only after the queue is drained
//! - **Isolated failures**: sink errors go to an observer, never to producers
//! - **Deterministic**: injectable clock and in-memory sink for tests

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AsyncLogger, Clock, ErrorObserver, LineFormat, LineFormatter, LogEntry, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, ManualClock, Result, Severity, Sink,
        StopStatus, SystemClock, TimestampFormat, DEFAULT_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use core::{
    AsyncLogger, Clock, ErrorObserver, LineFormat, LineFormatter, LogEntry, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, ManualClock, Result, Severity, Sink, StopStatus,
    SystemClock, TimestampFormat, DEFAULT_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
