//! # Rust Log Registry
//!
//! A pluggable logging facade: services log through the [`Logger`] trait and
//! never bind to a concrete backend.
//!
//! ## Features
//!
//! - **Registry**: one shared default logger, or one logger per name built by
//!   a factory, with per-name level overrides
//! - **Async dispatch**: [`AsyncLogger`] moves backend I/O onto a worker
//!   thread behind a bounded queue and drains it completely on shutdown
//! - **Reference backend**: [`StandardLogger`] renders text, JSON or logfmt
//!   to the console or a file
//!
//! ## Example
//!
//! ```
//! use rust_log_registry::prelude::*;
//! use rust_log_registry::info;
//!
//! let registry = LoggerRegistry::new();
//! registry
//!     .configure(RegistryConfig::multiplexed(default_factory()).with_level("http", LogLevel::Warn))
//!     .unwrap();
//!
//! let http = registry.get("http");
//! info!(http, &LogContext::new(), "filtered out");
//! assert_eq!(http.level(), LogLevel::Warn);
//! ```

pub mod appenders;
pub mod backends;
pub mod core;
pub mod dispatch;
pub mod macros;
pub mod registry;
pub mod settings;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::backends::{default_factory, StandardLogger};
    pub use crate::core::{
        factory_fn, Appender, BoxError, FieldValue, LogContext, LogLevel, Logger, LoggerError,
        LoggerFactory, OutputFormat, Result, SharedLogger, TraceIds,
    };
    pub use crate::dispatch::{AsyncLogger, DispatchState};
    pub use crate::registry::{LogMode, LoggerRegistry, RegistryConfig};
    pub use crate::settings::LoggingSettings;
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use backends::{default_factory, StandardLogger, StandardLoggerBuilder};
pub use self::core::{
    factory_fn, Appender, BoxError, FieldValue, LogContext, LogEntry, LogLevel, Logger,
    LoggerError, LoggerFactory, OutputFormat, Result, SharedLogger, TimestampFormat, TraceIds,
};
pub use dispatch::{
    AsyncLogger, DispatchMetrics, DispatchState, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use registry::{LogMode, LoggerRegistry, RegistryConfig, DEFAULT_LOGGER_NAME};
pub use settings::LoggingSettings;
