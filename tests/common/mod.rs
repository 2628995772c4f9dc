//! Test doubles shared by the integration tests

#![allow(dead_code)]

use parking_lot::{Mutex, RwLock};
use rust_log_registry::core::{BoxError, LogContext, LogLevel, Logger, LoggerError, Result};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One record seen by a [`RecordingLogger`]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: LogLevel,
    pub message: String,
    pub error: Option<String>,
    pub thread: Option<String>,
}

/// In-memory logger that remembers everything it emits.
///
/// Cloning shares the same record list, so a test can keep a handle after
/// handing the logger to a registry or decorator.
#[derive(Clone)]
pub struct RecordingLogger {
    name: String,
    level: Arc<RwLock<LogLevel>>,
    records: Arc<Mutex<Vec<Record>>>,
    delay: Option<Duration>,
    set_level_calls: Arc<AtomicUsize>,
    shutdown_calls: Arc<AtomicUsize>,
    reject_levels: bool,
}

impl RecordingLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Arc::new(RwLock::new(LogLevel::Info)),
            records: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            set_level_calls: Arc::new(AtomicUsize::new(0)),
            shutdown_calls: Arc::new(AtomicUsize::new(0)),
            reject_levels: false,
        }
    }

    pub fn with_level(self, level: LogLevel) -> Self {
        *self.level.write() = level;
        self
    }

    /// Sleep this long inside every emit call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every `set_level` call fail
    pub fn rejecting_levels(mut self) -> Self {
        self.reject_levels = true;
        self
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.message.clone()).collect()
    }

    pub fn set_level_calls(&self) -> usize {
        self.set_level_calls.load(Ordering::SeqCst)
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }

    fn push(&self, level: LogLevel, message: String, error: Option<String>) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.records.lock().push(Record {
            level,
            message,
            error,
            thread: std::thread::current().name().map(String::from),
        });
    }

    fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if level >= *self.level.read() {
            self.push(level, args.to_string(), None);
        }
    }
}

impl Logger for RecordingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        *self.level.read()
    }

    fn set_level(&self, level: LogLevel) -> Result<()> {
        self.set_level_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_levels {
            return Err(LoggerError::invalid_level(level.to_string()));
        }
        *self.level.write() = level;
        Ok(())
    }

    fn debug(&self, _ctx: &LogContext, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Debug, args);
    }

    fn info(&self, _ctx: &LogContext, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args);
    }

    fn warn(&self, _ctx: &LogContext, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, args);
    }

    fn error(&self, _ctx: &LogContext, message: &str, err: BoxError) {
        self.push(LogLevel::Error, message.to_string(), Some(err.to_string()));
    }

    fn shutdown(&self) -> Result<()> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
