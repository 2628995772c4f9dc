//! The logger capability every backend and decorator implements

use super::{error::Result, log_context::LogContext, log_level::LogLevel};
use std::fmt;
use std::sync::Arc;

/// Error value attached to [`Logger::error`] calls.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A logger shared between the registry and its callers.
pub type SharedLogger = Arc<dyn Logger>;

/// Constructor used by the registry to build a logger for a name.
pub type LoggerFactory = Arc<dyn Fn(&str) -> SharedLogger + Send + Sync>;

/// Wrap a closure as a [`LoggerFactory`].
///
/// # Example
///
/// ```
/// use rust_log_registry::backends::StandardLogger;
/// use rust_log_registry::core::{factory_fn, Logger, SharedLogger};
/// use std::sync::Arc;
///
/// let factory = factory_fn(|name| Arc::new(StandardLogger::new(name)) as SharedLogger);
/// assert_eq!(factory("billing").name(), "billing");
/// ```
pub fn factory_fn<F>(f: F) -> LoggerFactory
where
    F: Fn(&str) -> SharedLogger + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Structured logging capability.
///
/// `debug`, `info` and `warn` emit only when the logger's current level is at
/// or below the call's level; below-threshold calls must have no side effects.
/// `error` always emits and always carries the error's description.
///
/// `shutdown` releases backend resources. Calling it more than once on the
/// same instance is the caller's responsibility to avoid.
pub trait Logger: Send + Sync {
    /// Stable name, fixed at construction
    fn name(&self) -> &str;

    /// Current minimum level
    fn level(&self) -> LogLevel;

    /// Change the minimum level for all subsequent emit calls
    fn set_level(&self, level: LogLevel) -> Result<()>;

    fn debug(&self, ctx: &LogContext, args: fmt::Arguments<'_>);

    fn info(&self, ctx: &LogContext, args: fmt::Arguments<'_>);

    fn warn(&self, ctx: &LogContext, args: fmt::Arguments<'_>);

    fn error(&self, ctx: &LogContext, message: &str, err: BoxError);

    fn shutdown(&self) -> Result<()>;

    /// Whether a call at `level` would currently be emitted
    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn level(&self) -> LogLevel {
        (**self).level()
    }

    fn set_level(&self, level: LogLevel) -> Result<()> {
        (**self).set_level(level)
    }

    fn debug(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        (**self).debug(ctx, args)
    }

    fn info(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        (**self).info(ctx, args)
    }

    fn warn(&self, ctx: &LogContext, args: fmt::Arguments<'_>) {
        (**self).warn(ctx, args)
    }

    fn error(&self, ctx: &LogContext, message: &str, err: BoxError) {
        (**self).error(ctx, message, err)
    }

    fn shutdown(&self) -> Result<()> {
        (**self).shutdown()
    }

    fn enabled(&self, level: LogLevel) -> bool {
        (**self).enabled(level)
    }
}
