//! Logging macros for ergonomic message formatting.
//!
//! Each macro formats its arguments like `format!` and submits the result,
//! evaluating to the `Result` of the submit.
//!
//! # Examples
//!
//! ```
//! use async_line_logger::prelude::*;
//! use async_line_logger::{info, warning};
//!
//! let logger = AsyncLogger::new(8, MemorySink::new())?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//! warning!(logger, "{} of {} workers busy", 7, 8)?;
//!
//! logger.stop()?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message at the given severity with automatic formatting.
///
/// # Examples
///
/// ```
/// # use async_line_logger::prelude::*;
/// # let logger = AsyncLogger::new(4, MemorySink::new()).unwrap();
/// use async_line_logger::log;
/// log!(logger, Severity::Info, "Simple message").unwrap();
/// log!(logger, Severity::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format!($($arg)+))
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an error message.
///
/// # Examples
///
/// ```
/// # use async_line_logger::prelude::*;
/// # let logger = AsyncLogger::new(4, MemorySink::new()).unwrap();
/// use async_line_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{AsyncLogger, Severity};
    use crate::sinks::MemorySink;

    #[test]
    fn test_macros_format_and_submit() {
        let sink = MemorySink::new();
        let logger = AsyncLogger::new(8, sink.clone()).unwrap();

        log!(logger, Severity::Info, "Formatted: {}", 42).unwrap();
        info!(logger, "Items: {}", 100).unwrap();
        warning!(logger, "Retry {} of {}", 1, 3).unwrap();
        error!(logger, "Code: {}", 500).unwrap();
        logger.stop().unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("[INFO   ] Formatted: 42"));
        assert!(lines[1].ends_with("[INFO   ] Items: 100"));
        assert!(lines[2].ends_with("[WARNING] Retry 1 of 3"));
        assert!(lines[3].ends_with("[ERROR  ] Code: 500"));
    }

    #[test]
    fn test_macro_reports_closed_logger() {
        let logger = AsyncLogger::new(2, MemorySink::new()).unwrap();
        logger.stop().unwrap();
        assert!(info!(logger, "too late {}", 1).is_err());
    }
}
