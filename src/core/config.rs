//! Serializable logger settings
//!
//! Covers everything about an [`AsyncLogger`](super::AsyncLogger) that can
//! be written down: queue depth, severity filter and line rendering. Sinks,
//! clocks and observers are wired in code through the builder.

use super::error::{LoggerError, Result};
use super::line_format::LineFormat;
use super::severity::Severity;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Queue depth used when none is configured
pub const DEFAULT_CAPACITY: usize = 50;

/// # Example
///
/// ```
/// use async_line_logger::{LoggerConfig, Severity};
///
/// let config = LoggerConfig::from_json(r#"{"capacity": 8, "min_severity": "WARNING"}"#).unwrap();
/// assert_eq!(config.capacity, 8);
/// assert_eq!(config.min_severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub capacity: usize,
    pub min_severity: Severity,
    pub timestamp_format: TimestampFormat,
    pub line_format: LineFormat,
    pub colored: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            min_severity: Severity::Info,
            timestamp_format: TimestampFormat::default(),
            line_format: LineFormat::default(),
            colored: false,
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(LoggerError::config(
                "AsyncLogger",
                "capacity must be at least 1",
            ));
        }
        Ok(())
    }
}
