//! Reference synchronous backend
//!
//! `StandardLogger` is what the registry builds when no other factory has
//! been installed. It renders each record through an [`Appender`] on the
//! calling thread.

use crate::appenders::ConsoleAppender;
use crate::core::{
    factory_fn, Appender, BoxError, FieldValue, LogContext, LogEntry, LogLevel, Logger,
    LoggerFactory, OutputFormat, Result, SharedLogger,
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Hook pulling extra fields out of the caller's context.
pub type ContextExtractor = Arc<dyn Fn(&LogContext) -> Vec<(String, FieldValue)> + Send + Sync>;

pub struct StandardLogger {
    name: String,
    min_level: RwLock<LogLevel>,
    appender: Mutex<Box<dyn Appender>>,
    environment: Option<String>,
    extractor: Option<ContextExtractor>,
}

impl StandardLogger {
    /// Logger at `Info` writing text to the console
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    #[must_use]
    pub fn builder(name: impl Into<String>) -> StandardLoggerBuilder {
        StandardLoggerBuilder::new(name)
    }

    fn record(&self, level: LogLevel, ctx: &LogContext, message: &str, err: Option<&str>) {
        let mut entry = LogEntry::new(level, self.name.as_str(), message);

        for (key, value) in ctx.fields() {
            entry.add_field(key.clone(), value.clone());
        }
        if let Some(ref extract) = self.extractor {
            for (key, value) in extract(ctx) {
                entry.add_field(key, value);
            }
        }
        if let Some(trace) = ctx.trace_ids() {
            entry.add_field("trace_id", trace.trace_id.as_str());
            entry.add_field("span_id", trace.span_id.as_str());
        }
        entry.add_field("source", self.name.as_str());
        if let Some(ref env) = self.environment {
            entry.add_field("env", env.as_str());
        }
        if let Some(err) = err {
            entry = entry.with_error(err);
        }

        let mut appender = self.appender.lock();
        if let Err(e) = appender.append(&entry) {
            eprintln!(
                "[LOGGER ERROR] Logger '{}' failed to write to appender '{}': {}",
                self.name,
                appender.name(),
                e
            );
        }
    }

    fn emit(&self, level: LogLevel, ctx: &LogContext, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        // Avoid an allocation for messages without arguments
        match args.as_str() {
            Some(message) => self.record(level, ctx, message, None),
            None => self.record(level, ctx, &args.to_string(), None),
        }
    }
}

impl Logger for StandardLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    fn set_level(&self, level: LogLevel) -> Result<()> {
        *self.min_level.write() = level;
        Ok(())
    }

    fn debug(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Debug, ctx, args);
    }

    fn info(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, ctx, args);
    }

    fn warn(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, ctx, args);
    }

    fn error(&self, ctx: &LogContext, message: &str, err: BoxError) {
        self.record(LogLevel::Error, ctx, message, Some(&err.to_string()));
    }

    fn shutdown(&self) -> Result<()> {
        self.appender.lock().flush()
    }
}

impl fmt::Debug for StandardLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`StandardLogger`] with a fluent API
///
/// # Example
/// ```
/// use rust_log_registry::backends::StandardLogger;
/// use rust_log_registry::core::{LogLevel, Logger, OutputFormat};
///
/// let logger = StandardLogger::builder("payments")
///     .level(LogLevel::Debug)
///     .format(OutputFormat::Json)
///     .environment("staging")
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub struct StandardLoggerBuilder {
    name: String,
    level: LogLevel,
    format: OutputFormat,
    appender: Option<Box<dyn Appender>>,
    environment: Option<String>,
    extractor: Option<ContextExtractor>,
}

impl StandardLoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::Info,
            format: OutputFormat::Text,
            appender: None,
            environment: None,
            extractor: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Output format of the default console appender; ignored when a custom
    /// appender is supplied
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn extractor(mut self, extractor: ContextExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn build(self) -> StandardLogger {
        let format = self.format;
        let appender = self
            .appender
            .unwrap_or_else(|| Box::new(ConsoleAppender::new().with_output_format(format)));

        StandardLogger {
            name: self.name,
            min_level: RwLock::new(self.level),
            appender: Mutex::new(appender),
            environment: self.environment,
            extractor: self.extractor,
        }
    }
}

/// The registry's stock factory: a console [`StandardLogger`] at `Info`.
pub fn default_factory() -> LoggerFactory {
    factory_fn(|name| Arc::new(StandardLogger::new(name)) as SharedLogger)
}
