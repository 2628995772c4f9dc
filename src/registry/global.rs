//! Process-wide registry
//!
//! Thin free functions over one lazily created [`LoggerRegistry`]. Code that
//! can take a registry as a dependency should prefer an explicit instance;
//! these exist for the process boundary.

use super::config::RegistryConfig;
use super::logger_registry::LoggerRegistry;
use crate::core::{LogLevel, LoggerFactory, Result, SharedLogger};
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// The process-wide registry
pub fn global() -> &'static LoggerRegistry {
    GLOBAL_REGISTRY.get_or_init(LoggerRegistry::new)
}

/// The process-wide default logger
pub fn logger() -> SharedLogger {
    global().default_logger()
}

pub fn set_logger(logger: SharedLogger) {
    global().set_default(logger);
}

pub fn set_logger_factory(factory: LoggerFactory) {
    global().set_factory(factory);
}

/// Logger for `name` from the process-wide registry
pub fn named(name: &str) -> SharedLogger {
    global().get(name)
}

/// Configure the process-wide registry.
///
/// An error here means logging is misconfigured; callers should treat it
/// as fatal at startup.
pub fn configure(config: RegistryConfig) -> Result<()> {
    global().configure(config)
}

pub fn set_level(name: &str, level: LogLevel) -> Result<()> {
    global().set_level(name, level)
}

pub fn shutdown_all() -> Result<()> {
    global().shutdown_all()
}

/// Restore the process-wide registry to its initial state
pub fn reset() {
    global().reset();
}
