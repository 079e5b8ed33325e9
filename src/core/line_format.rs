//! Rendering of log entries into single output lines
//!
//! Whatever the layout, each line carries the timestamp, the severity tag
//! and the message, in that order, and never contains a raw line break.

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Line layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineFormat {
    /// Human-readable text (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO   ] Request processed`
    #[default]
    Text,

    /// One JSON object per line
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","severity":"INFO","message":"Request processed"}`
    Json,

    /// Logfmt key=value pairs
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z severity=INFO message="Request processed"`
    Logfmt,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    timestamp: serde_json::Value,
    severity: &'static str,
    message: &'a str,
}

/// Turns entries into lines according to a layout and timestamp format
#[derive(Debug, Clone, Default)]
pub struct LineFormatter {
    line_format: LineFormat,
    timestamp_format: TimestampFormat,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    colored: bool,
}

impl LineFormatter {
    #[must_use]
    pub fn new(line_format: LineFormat, timestamp_format: TimestampFormat) -> Self {
        Self {
            line_format,
            timestamp_format,
            colored: false,
        }
    }

    /// Color the severity tag of text lines (no effect without the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn line_format(&self) -> LineFormat {
        self.line_format
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn format(&self, entry: &LogEntry) -> String {
        match self.line_format {
            LineFormat::Text => self.format_text(entry),
            LineFormat::Json => self.format_json(entry),
            LineFormat::Logfmt => self.format_logfmt(entry),
        }
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(&entry.timestamp()),
            self.severity_tag(entry),
            entry.sanitized_message()
        )
    }

    #[cfg(feature = "console")]
    fn severity_tag(&self, entry: &LogEntry) -> String {
        use colored::Colorize;

        let tag = format!("{:7}", entry.severity());
        if self.colored {
            tag.color(entry.severity().color_code()).to_string()
        } else {
            tag
        }
    }

    #[cfg(not(feature = "console"))]
    fn severity_tag(&self, entry: &LogEntry) -> String {
        format!("{:7}", entry.severity())
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        let timestamp = if self.timestamp_format.is_numeric() {
            serde_json::Value::Number(entry.timestamp().timestamp_millis().into())
        } else {
            serde_json::Value::String(self.timestamp_format.format(&entry.timestamp()))
        };

        let line = JsonLine {
            timestamp,
            severity: entry.severity().to_str(),
            message: entry.message(),
        };
        serde_json::to_string(&line).unwrap_or_default()
    }

    fn format_logfmt(&self, entry: &LogEntry) -> String {
        format!(
            "timestamp={} severity={} message={}",
            escape_logfmt_value(&self.timestamp_format.format(&entry.timestamp())),
            entry.severity().to_str(),
            quote_logfmt_value(&entry.sanitized_message())
        )
    }
}

/// Quote a logfmt value if it contains spaces, quotes or '='
fn escape_logfmt_value(value: &str) -> String {
    if value.contains(' ') || value.contains('"') || value.contains('=') {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
