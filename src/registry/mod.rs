//! Logger registry: singleton vs. per-name loggers and level overrides

pub mod config;
pub mod global;
pub mod logger_registry;

pub use config::{LogMode, RegistryConfig};
pub use global::{
    configure, global, logger, named, reset, set_level, set_logger, set_logger_factory,
    shutdown_all,
};
pub use logger_registry::{LoggerRegistry, DEFAULT_LOGGER_NAME};
