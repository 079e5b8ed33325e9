//! Asynchronous logger with a single background worker
//!
//! Producers push entries into a bounded channel; one worker thread formats
//! them and writes them to the sink in admission order. A full channel
//! blocks the producer instead of dropping the entry. Stopping closes
//! admission, lets the worker drain what is buffered, and waits for it.

use super::{
    clock::{Clock, SystemClock},
    config::LoggerConfig,
    error::{LoggerError, Result},
    line_format::{LineFormat, LineFormatter},
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    observer::{stderr_observer, ErrorObserver},
    severity::Severity,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::ConsoleSink;
use crossbeam_channel::{bounded, select, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout used when the logger is dropped without `stop()`
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a bounded-wait stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopStatus {
    /// The worker exited after writing every buffered entry
    Drained,
    /// The deadline passed first; the worker keeps draining in the background
    TimedOut { remaining: u64 },
}

struct WorkerSlot {
    handle: Option<thread::JoinHandle<()>>,
    /// Disconnects when the worker thread is done
    finished: Receiver<()>,
}

pub struct AsyncLogger {
    /// Admission gate: `None` once stopped
    producer: RwLock<Option<Sender<LogEntry>>>,
    /// Set as soon as any stop begins, even if the gate cannot be taken yet
    closed: AtomicBool,
    /// Dropped on close; disconnection wakes producers blocked on a full queue
    closer: Mutex<Option<Sender<()>>>,
    closing: Receiver<()>,
    stop_signal: Sender<()>,
    worker: Mutex<WorkerSlot>,
    worker_dead: Arc<AtomicBool>,
    clock: Arc<dyn Clock>,
    min_severity: Severity,
    capacity: usize,
    metrics: Arc<LoggerMetrics>,
}

impl AsyncLogger {
    /// Create a logger with the given queue depth writing to `sink`
    pub fn new<S: Sink + 'static>(capacity: usize, sink: S) -> Result<Self> {
        Self::builder().capacity(capacity).sink(sink).build()
    }

    /// Create a builder for AsyncLogger
    ///
    /// # Example
    /// ```
    /// use async_line_logger::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let logger = AsyncLogger::builder()
    ///     .capacity(16)
    ///     .sink(sink.clone())
    ///     .build()
    ///     .unwrap();
    ///
    /// logger.info("service started").unwrap();
    /// logger.stop().unwrap();
    /// assert_eq!(sink.lines().len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn spawn(
        config: LoggerConfig,
        sink: Box<dyn Sink>,
        clock: Arc<dyn Clock>,
        observer: ErrorObserver,
    ) -> Result<Self> {
        config.validate()?;

        let (sender, entries) = bounded(config.capacity);
        let (stop_signal, stop) = bounded(1);
        let (finished_tx, finished) = bounded::<()>(0);
        let (closer, closing) = bounded::<()>(0);
        let metrics = Arc::new(LoggerMetrics::new());
        let worker_dead = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            entries,
            stop,
            output: Output {
                sink,
                formatter: LineFormatter::new(config.line_format, config.timestamp_format)
                    .with_colors(config.colored),
                observer: Arc::clone(&observer),
                metrics: Arc::clone(&metrics),
            },
            _finished: finished_tx,
        };
        let dead_flag = Arc::clone(&worker_dead);

        let handle = thread::Builder::new()
            .name("async-logger-worker".to_string())
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(move || worker.run()));
                if let Err(panic_info) = outcome {
                    dead_flag.store(true, Ordering::Release);
                    eprintln!(
                        "[LOGGER CRITICAL] Worker panicked: {}. No further entries will be written.",
                        panic_message(&*panic_info)
                    );
                    observer(&LoggerError::WorkerDead, None);
                }
            })?;

        Ok(Self {
            producer: RwLock::new(Some(sender)),
            closed: AtomicBool::new(false),
            closer: Mutex::new(Some(closer)),
            closing,
            stop_signal,
            worker: Mutex::new(WorkerSlot {
                handle: Some(handle),
                finished,
            }),
            worker_dead,
            clock,
            min_severity: config.min_severity,
            capacity: config.capacity,
            metrics,
        })
    }

    /// Enqueue an entry, waiting for space if the queue is full
    ///
    /// Fails with [`LoggerError::LoggerClosed`] once a stop has begun, also
    /// when the stop begins while this call is waiting for space, and with
    /// [`LoggerError::WorkerDead`] if the worker is gone.
    pub fn submit(&self, entry: LogEntry) -> Result<()> {
        let producer = self.producer.read();
        let sender = producer.as_ref().ok_or(LoggerError::LoggerClosed)?;
        if self.closed.load(Ordering::Acquire) {
            return Err(LoggerError::LoggerClosed);
        }

        if self.worker_dead.load(Ordering::Acquire) {
            return Err(LoggerError::WorkerDead);
        }

        if entry.severity() < self.min_severity {
            self.metrics.record_filtered();
            return Ok(());
        }

        match sender.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                self.metrics.record_blocked();
                // The entry channel stays connected while we hold the read
                // guard, so a failed send can only mean the worker is gone
                select! {
                    send(sender, entry) -> sent => sent.map_err(|_| LoggerError::WorkerDead)?,
                    recv(self.closing) -> _ => return Err(LoggerError::LoggerClosed),
                }
            }
            Err(TrySendError::Disconnected(_)) => return Err(LoggerError::WorkerDead),
        }

        self.metrics.record_submitted();
        Ok(())
    }

    /// Stamp a message with the logger's clock and submit it
    pub fn log(&self, severity: Severity, message: impl Into<String>) -> Result<()> {
        self.submit(LogEntry::now(self.clock.as_ref(), severity, message))
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Info, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Warning, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Error, message)
    }

    /// Stop the logger and wait until every buffered entry is written
    ///
    /// Idempotent: later calls return immediately with the same result.
    /// Returns [`LoggerError::WorkerDead`] if the worker had died.
    pub fn stop(&self) -> Result<()> {
        self.begin_close();
        let mut slot = self.worker.lock();
        self.close_admission(None);
        self.finish(&mut slot, None).map(|_| ())
    }

    /// Like [`stop`](Self::stop), but gives up waiting after `timeout`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use async_line_logger::{AsyncLogger, ConsoleSink, StopStatus};
    /// use std::time::Duration;
    ///
    /// let logger = AsyncLogger::new(100, ConsoleSink::new()).unwrap();
    /// logger.info("Important message").unwrap();
    ///
    /// if let Ok(StopStatus::TimedOut { remaining }) = logger.stop_timeout(Duration::from_secs(1)) {
    ///     eprintln!("{} entries still queued", remaining);
    /// }
    /// ```
    pub fn stop_timeout(&self, timeout: Duration) -> Result<StopStatus> {
        let deadline = Instant::now() + timeout;
        self.begin_close();

        let Some(mut slot) = self.worker.try_lock_until(deadline) else {
            return Ok(self.timed_out());
        };
        if !self.close_admission(Some(deadline)) {
            return Ok(self.timed_out());
        }
        self.finish(&mut slot, Some(deadline))
    }

    /// Refuse new submits and release producers waiting for space
    fn begin_close(&self) {
        self.closed.store(true, Ordering::Release);
        drop(self.closer.lock().take());
    }

    /// Take the sender out of the gate; waits for in-flight submits
    fn close_admission(&self, deadline: Option<Instant>) -> bool {
        let guard = match deadline {
            Some(deadline) => self.producer.try_write_until(deadline),
            None => Some(self.producer.write()),
        };

        match guard {
            Some(mut producer) => {
                drop(producer.take());
                true
            }
            None => false,
        }
    }

    fn finish(&self, slot: &mut WorkerSlot, deadline: Option<Instant>) -> Result<StopStatus> {
        // Full or disconnected both mean the worker already has its answer
        let _ = self.stop_signal.try_send(());

        if let Some(handle) = slot.handle.take() {
            if let Some(deadline) = deadline {
                if let Err(RecvTimeoutError::Timeout) = slot.finished.recv_deadline(deadline) {
                    slot.handle = Some(handle);
                    return Ok(self.timed_out());
                }
            }

            if handle.join().is_err() {
                self.worker_dead.store(true, Ordering::Release);
            }
        }

        if self.worker_dead.load(Ordering::Acquire) {
            Err(LoggerError::WorkerDead)
        } else {
            Ok(StopStatus::Drained)
        }
    }

    fn timed_out(&self) -> StopStatus {
        StopStatus::TimedOut {
            remaining: self.metrics.pending(),
        }
    }

    /// Queue depth fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries admitted but not yet handed to the sink
    pub fn pending(&self) -> u64 {
        self.metrics.pending()
    }

    /// True once `stop` or `stop_timeout` has closed admission
    pub fn is_stopped(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn is_worker_alive(&self) -> bool {
        !self.worker_dead.load(Ordering::Acquire)
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for AsyncLogger {
    fn drop(&mut self) {
        // WorkerDead has already gone to the observer
        if let Ok(StopStatus::TimedOut { remaining }) = self.stop_timeout(DEFAULT_SHUTDOWN_TIMEOUT)
        {
            eprintln!(
                "[LOGGER WARNING] Worker did not finish within {:?} timeout. \
                 {} entries may be lost.",
                DEFAULT_SHUTDOWN_TIMEOUT, remaining
            );
        }
    }
}

/// The consumer side: owns the sink for the logger's whole life
struct Worker {
    entries: Receiver<LogEntry>,
    stop: Receiver<()>,
    output: Output,
    _finished: Sender<()>,
}

struct Output {
    sink: Box<dyn Sink>,
    formatter: LineFormatter,
    observer: ErrorObserver,
    metrics: Arc<LoggerMetrics>,
}

impl Worker {
    fn run(self) {
        let Worker {
            entries,
            stop,
            mut output,
            _finished,
        } = self;

        loop {
            select! {
                recv(entries) -> msg => match msg {
                    Ok(entry) => {
                        output.emit(&entry);
                        if entries.is_empty() {
                            output.flush();
                        }
                    }
                    // Every sender is gone and the queue is empty
                    Err(_) => break,
                },
                recv(stop) -> _ => break,
            }
        }

        // Admission is closed before the stop signal is sent, so this
        // sees every entry that will ever arrive
        while let Ok(entry) = entries.try_recv() {
            output.emit(&entry);
        }
        output.flush();
    }
}

impl Output {
    fn emit(&mut self, entry: &LogEntry) {
        let line = self.formatter.format(entry);
        match self.sink.write_entry(entry, &line) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                self.metrics.record_write_failure();
                let error = LoggerError::sink_write(self.sink.name(), e);
                (self.observer)(&error, Some(entry));
            }
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.sink.flush() {
            self.metrics.record_flush_failure();
            let error = LoggerError::sink_flush(self.sink.name(), e);
            (self.observer)(&error, None);
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing AsyncLogger with a fluent API
///
/// # Example
/// ```
/// use async_line_logger::prelude::*;
///
/// let logger = AsyncLogger::builder()
///     .capacity(50)
///     .min_severity(Severity::Warning)
///     .line_format(LineFormat::Logfmt)
///     .sink(ConsoleSink::new())
///     .on_error(|error, _entry| eprintln!("ALERT: {}", error))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Box<dyn Sink>>,
    clock: Option<Arc<dyn Clock>>,
    observer: Option<ErrorObserver>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            clock: None,
            observer: None,
        }
    }

    /// Replace every serializable setting at once
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the queue depth (default 50)
    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.config.min_severity = severity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn line_format(mut self, format: LineFormat) -> Self {
        self.config.line_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colored(mut self, colored: bool) -> Self {
        self.config.colored = colored;
        self
    }

    /// Set the output sink (default: [`ConsoleSink`])
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Set the time source used to stamp entries (default: [`SystemClock`])
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the callback receiving worker-side failures
    ///
    /// Defaults to printing on stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_error<F>(mut self, observer: F) -> Self
    where
        F: Fn(&LoggerError, Option<&LogEntry>) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Build the logger and start its worker
    pub fn build(self) -> Result<AsyncLogger> {
        let sink = self.sink.unwrap_or_else(|| Box::new(ConsoleSink::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let observer = self.observer.unwrap_or_else(stderr_observer);

        AsyncLogger::spawn(self.config, sink, clock, observer)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
