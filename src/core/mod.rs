//! Core logger types and traits

pub mod clock;
pub mod config;
pub mod error;
pub mod line_format;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod observer;
pub mod severity;
pub mod sink;
pub mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LoggerConfig, DEFAULT_CAPACITY};
pub use error::{LoggerError, Result};
pub use line_format::{LineFormat, LineFormatter};
pub use log_entry::LogEntry;
pub use logger::{AsyncLogger, LoggerBuilder, StopStatus, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use observer::{stderr_observer, ErrorObserver};
pub use severity::Severity;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
