//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// `submit` was called after `stop`
    #[error("Logger is closed")]
    LoggerClosed,

    /// The background worker terminated without being stopped
    #[error("Logger worker terminated unexpectedly")]
    WorkerDead,

    /// A sink rejected a line; reported to the error observer only
    #[error("Sink '{sink}' failed to write entry: {source}")]
    SinkWriteFailed {
        sink: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// A sink failed to flush; reported to the error observer only
    #[error("Sink '{sink}' failed to flush: {source}")]
    SinkFlushFailed {
        sink: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    Writer(String),
}

impl LoggerError {
    /// Wrap a sink error raised while writing a line
    pub fn sink_write(sink: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::SinkWriteFailed {
            sink: sink.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a sink error raised while flushing
    pub fn sink_flush(sink: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::SinkFlushFailed {
            sink: sink.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }

    /// True for errors the worker reports and then keeps running after
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LoggerError::SinkWriteFailed { .. } | LoggerError::SinkFlushFailed { .. }
        )
    }
}
