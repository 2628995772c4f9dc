//! Asynchronous dispatch decorator
//!
//! [`AsyncLogger`] wraps any [`Logger`] and turns each emit call into a job
//! on a bounded queue. One worker thread runs the jobs in FIFO order against
//! the wrapped logger, so the wrapped logger only ever sees one call at a
//! time.
//!
//! Lifecycle: `Running -> Draining -> Stopped`, entered once via
//! [`AsyncLogger::shutdown`]. Shutdown closes the intake, waits for every
//! queued job to run, then shuts the wrapped logger down.

use super::metrics::DispatchMetrics;
use crate::core::{BoxError, LogContext, LogLevel, Logger, LoggerError, Result, SharedLogger};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Queue capacity used by [`AsyncLogger::new`]
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// How long `Drop` waits for the queue to drain when the logger was never
/// shut down explicitly
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

type Job = Box<dyn FnOnce(&dyn Logger) + Send>;

/// Lifecycle of an [`AsyncLogger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DispatchState {
    /// Accepting emit calls
    Running = 0,
    /// Intake closed, worker still running queued jobs
    Draining = 1,
    /// Queue drained and wrapped logger shut down
    Stopped = 2,
}

impl DispatchState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => DispatchState::Running,
            1 => DispatchState::Draining,
            _ => DispatchState::Stopped,
        }
    }
}

/// Decorator that moves backend work off the calling thread.
///
/// A full queue blocks the caller until the worker frees a slot; records are
/// never dropped for lack of space.
///
/// The severity gate is applied by the wrapped logger when a job runs, not
/// when it is queued. A [`set_level`](Logger::set_level) call therefore also
/// affects jobs that were queued before it but have not run yet.
///
/// # Example
///
/// ```
/// use rust_log_registry::backends::StandardLogger;
/// use rust_log_registry::core::{LogContext, Logger};
/// use rust_log_registry::dispatch::AsyncLogger;
///
/// let logger = AsyncLogger::with_capacity(StandardLogger::new("jobs"), 64).unwrap();
/// logger.info(&LogContext::new(), format_args!("picked up job {}", 7));
/// logger.shutdown().unwrap();
/// ```
pub struct AsyncLogger {
    inner: SharedLogger,
    capacity: usize,
    sender: RwLock<Option<Sender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    state: AtomicU8,
    metrics: Arc<DispatchMetrics>,
}

impl AsyncLogger {
    /// Wrap `inner` with a queue of [`DEFAULT_QUEUE_CAPACITY`] entries
    pub fn new(inner: impl Logger + 'static) -> Result<Self> {
        Self::with_capacity(inner, DEFAULT_QUEUE_CAPACITY)
    }

    /// Wrap `inner` with a queue of `capacity` entries
    pub fn with_capacity(inner: impl Logger + 'static, capacity: usize) -> Result<Self> {
        Self::from_shared(Arc::new(inner), capacity)
    }

    /// Wrap an already shared logger.
    ///
    /// Nothing else may call `inner` directly once it is decorated.
    pub fn from_shared(inner: SharedLogger, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config(
                "AsyncLogger",
                "queue capacity must be greater than zero",
            ));
        }

        let (sender, receiver) = bounded(capacity);
        let metrics = Arc::new(DispatchMetrics::new());
        let handle = Self::spawn_worker(Arc::clone(&inner), receiver, Arc::clone(&metrics))?;

        Ok(Self {
            inner,
            capacity,
            sender: RwLock::new(Some(sender)),
            worker: Mutex::new(Some(handle)),
            state: AtomicU8::new(DispatchState::Running as u8),
            metrics,
        })
    }

    fn spawn_worker(
        inner: SharedLogger,
        receiver: Receiver<Job>,
        metrics: Arc<DispatchMetrics>,
    ) -> Result<JoinHandle<()>> {
        let thread_name = format!("log-dispatch-{}", inner.name());

        let handle = thread::Builder::new().name(thread_name).spawn(move || {
            // Ends once every sender is gone and the queue is empty
            for job in receiver.iter() {
                let result =
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| job(&*inner)));
                metrics.record_executed();

                if let Err(panic_info) = result {
                    metrics.record_panicked();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Logger '{}' panicked while handling a record: {}. \
                         Remaining records are still delivered.",
                        inner.name(),
                        panic_msg
                    );
                }
            }
        })?;

        Ok(handle)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> DispatchState {
        DispatchState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Push a job, blocking while the queue is full.
    fn try_enqueue(&self, job: Job) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard
            .as_ref()
            .ok_or_else(|| LoggerError::stopped(self.inner.name()))?;

        match sender.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                self.metrics.record_blocked();
                sender
                    .send(job)
                    .map_err(|_| LoggerError::stopped(self.inner.name()))?;
            }
            Err(TrySendError::Disconnected(_)) => {
                return Err(LoggerError::stopped(self.inner.name()));
            }
        }

        self.metrics.record_enqueued();
        Ok(())
    }

    fn enqueue(&self, job: Job) {
        if let Err(e) = self.try_enqueue(job) {
            let rejected = self.metrics.record_rejected();

            // Report the first rejection and periodically thereafter
            if rejected == 0 || (rejected + 1) % 1000 == 0 {
                eprintln!(
                    "[LOGGER ERROR] {}: {} emit call(s) rejected. \
                     The logger must not be used after shutdown.",
                    e,
                    rejected + 1
                );
            }
        }
    }

    /// Close the intake, wait for the queue to drain, then shut down the
    /// wrapped logger.
    ///
    /// Blocks for as long as the wrapped logger needs to process what is
    /// queued. Returns [`LoggerError::LoggerStopped`] if the logger was
    /// already shut down.
    pub fn shutdown(&self) -> Result<()> {
        self.shutdown_inner(None)
    }

    /// Like [`shutdown`](Self::shutdown), but stop *waiting* after `timeout`.
    ///
    /// On timeout the worker keeps draining in the background and
    /// [`LoggerError::ShutdownTimeout`] is returned; calling `shutdown` again
    /// resumes the wait.
    pub fn shutdown_timeout(&self, timeout: Duration) -> Result<()> {
        self.shutdown_inner(Some(timeout))
    }

    fn shutdown_inner(&self, timeout: Option<Duration>) -> Result<()> {
        match self.state.compare_exchange(
            DispatchState::Running as u8,
            DispatchState::Draining as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                // Dropping the only sender lets the worker finish the queue and exit
                drop(self.sender.write().take());
            }
            // A previous wait timed out
            Err(state) if state == DispatchState::Draining as u8 => {}
            Err(_) => return Err(LoggerError::stopped(self.inner.name())),
        }

        // Another caller is already waiting on the worker
        let handle = self
            .worker
            .lock()
            .take()
            .ok_or_else(|| LoggerError::stopped(self.inner.name()))?;

        if let Some(timeout) = timeout {
            let start = Instant::now();
            while !handle.is_finished() {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    *self.worker.lock() = Some(handle);
                    return Err(LoggerError::shutdown_timeout(self.inner.name(), timeout));
                }
                thread::sleep(DRAIN_POLL_INTERVAL.min(timeout - elapsed));
            }
        }

        let joined = handle.join();
        self.state
            .store(DispatchState::Stopped as u8, Ordering::Release);

        if joined.is_err() {
            return Err(LoggerError::worker_panicked(
                self.inner.name(),
                "worker thread exited abnormally",
            ));
        }

        self.inner.shutdown()
    }
}

impl Logger for AsyncLogger {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn level(&self) -> LogLevel {
        self.inner.level()
    }

    /// Applied immediately, not queued
    fn set_level(&self, level: LogLevel) -> Result<()> {
        self.inner.set_level(level)
    }

    fn debug(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        let ctx = ctx.clone();
        let message = args.to_string();
        self.enqueue(Box::new(move |logger: &dyn Logger| {
            logger.debug(&ctx, format_args!("{}", message))
        }));
    }

    fn info(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        let ctx = ctx.clone();
        let message = args.to_string();
        self.enqueue(Box::new(move |logger: &dyn Logger| {
            logger.info(&ctx, format_args!("{}", message))
        }));
    }

    fn warn(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        let ctx = ctx.clone();
        let message = args.to_string();
        self.enqueue(Box::new(move |logger: &dyn Logger| {
            logger.warn(&ctx, format_args!("{}", message))
        }));
    }

    fn error(&self, ctx: &LogContext, message: &str, err: BoxError) {
        let ctx = ctx.clone();
        let message = message.to_string();
        self.enqueue(Box::new(move |logger: &dyn Logger| {
            logger.error(&ctx, &message, err)
        }));
    }

    fn shutdown(&self) -> Result<()> {
        AsyncLogger::shutdown(self)
    }

    /// Always true: the wrapped logger decides when the job runs.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

impl fmt::Debug for AsyncLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncLogger")
            .field("name", &self.inner.name())
            .field("capacity", &self.capacity)
            .field("state", &self.state())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Drop for AsyncLogger {
    fn drop(&mut self) {
        if self.state() == DispatchState::Stopped {
            return;
        }

        match self.shutdown_inner(Some(DEFAULT_SHUTDOWN_TIMEOUT)) {
            Ok(()) | Err(LoggerError::LoggerStopped { .. }) => {}
            Err(LoggerError::ShutdownTimeout { .. }) => {
                eprintln!(
                    "[LOGGER WARNING] Async worker for '{}' did not finish within {:?}. \
                     It keeps draining in the background.",
                    self.inner.name(),
                    DEFAULT_SHUTDOWN_TIMEOUT
                );
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to shut down '{}': {}", self.inner.name(), e);
            }
        }
    }
}
