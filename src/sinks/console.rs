//! Console sink implementation

use crate::core::{LogEntry, Result, Severity, Sink};
use std::io::{self, Write};

/// Writes lines to stdout, with `Error` lines going to stderr
///
/// [`ConsoleSink::stderr`] sends every line to stderr instead.
pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    all_to_stderr: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    pub fn stderr() -> Self {
        Self {
            all_to_stderr: true,
            ..Self::new()
        }
    }

    fn with_writers(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            all_to_stderr: false,
        }
    }

    fn target(&mut self, severity: Option<Severity>) -> &mut dyn Write {
        if self.all_to_stderr || severity == Some(Severity::Error) {
            &mut *self.err
        } else {
            &mut *self.out
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.target(None), "{}", line)?;
        Ok(())
    }

    fn write_entry(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        writeln!(self.target(Some(entry.severity())), "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        if self.all_to_stderr {
            "stderr"
        } else {
            "console"
        }
    }
}
