//! Logging macros for ergonomic log message formatting.
//!
//! The level macros check [`Logger::enabled`](crate::core::Logger::enabled)
//! before building the message, so disabled calls cost a level comparison
//! and nothing else.
//!
//! # Examples
//!
//! ```
//! use rust_log_registry::backends::StandardLogger;
//! use rust_log_registry::core::LogContext;
//! use rust_log_registry::{error, info};
//!
//! let logger = StandardLogger::new("server");
//! let ctx = LogContext::new().with_field("request_id", "abc-123");
//!
//! info!(logger, &ctx, "Server started");
//!
//! let port = 8080;
//! info!(logger, &ctx, "Server listening on port {}", port);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
//! error!(logger, &ctx, err, "failed to bind port {}", port);
//! ```

/// Emit at `$level` through the named logger method when the level is enabled.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($method:ident, $level:expr, $logger:expr, $ctx:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::Logger as _;
        let logger = &$logger;
        if logger.enabled($level) {
            logger.$method($ctx, format_args!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_log_registry::backends::StandardLogger;
/// # use rust_log_registry::core::{LogContext, LogLevel};
/// # let logger = StandardLogger::builder("svc").level(LogLevel::Debug).build();
/// use rust_log_registry::debug;
/// debug!(logger, &LogContext::new(), "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::__log_at!(debug, $crate::core::LogLevel::Debug, $logger, $ctx, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::__log_at!(info, $crate::core::LogLevel::Info, $logger, $ctx, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_log_registry::backends::StandardLogger;
/// # use rust_log_registry::core::LogContext;
/// # let logger = StandardLogger::new("svc");
/// use rust_log_registry::warn;
/// warn!(logger, &LogContext::new(), "Memory usage high: {}%", 85);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::__log_at!(warn, $crate::core::LogLevel::Warn, $logger, $ctx, $($arg)+)
    };
}

/// Log an error together with its cause. Errors are never filtered.
///
/// `$err` is anything convertible into a
/// [`BoxError`](crate::core::BoxError): an error value, a `String` or a
/// `&str`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $ctx:expr, $err:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::Logger as _;
        let message = format!($($arg)+);
        $logger.error($ctx, &message, $crate::core::BoxError::from($err));
    }};
}
