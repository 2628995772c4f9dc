//! Registry configuration

use crate::core::{LogLevel, LoggerError, LoggerFactory, SharedLogger};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How the registry resolves loggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// One instance becomes the process-wide default
    Singleton,
    /// Each name gets its own instance from a factory
    Multiplexed,
}

impl TryFrom<u32> for LogMode {
    type Error = LoggerError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LogMode::Singleton),
            1 => Ok(LogMode::Multiplexed),
            other => Err(LoggerError::config(
                "RegistryConfig",
                format!("unknown log mode {}", other),
            )),
        }
    }
}

impl FromStr for LogMode {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singleton" => Ok(LogMode::Singleton),
            "multiplexed" | "multiple" => Ok(LogMode::Multiplexed),
            other => Err(LoggerError::config(
                "RegistryConfig",
                format!("unknown log mode '{}'", other),
            )),
        }
    }
}

/// Configuration applied wholesale by
/// [`LoggerRegistry::configure`](super::LoggerRegistry::configure).
///
/// The `singleton` logger is required in `Singleton` mode and the `factory`
/// in `Multiplexed` mode; the registry rejects the configuration otherwise.
///
/// # Example
///
/// ```
/// use rust_log_registry::backends::default_factory;
/// use rust_log_registry::core::LogLevel;
/// use rust_log_registry::registry::{LogMode, RegistryConfig};
///
/// let config = RegistryConfig::multiplexed(default_factory())
///     .with_level("audit", LogLevel::Error)
///     .with_level("http", LogLevel::Warn);
///
/// assert_eq!(config.mode, LogMode::Multiplexed);
/// assert_eq!(config.levels.len(), 2);
/// ```
#[derive(Clone)]
pub struct RegistryConfig {
    pub mode: LogMode,
    pub singleton: Option<SharedLogger>,
    pub factory: Option<LoggerFactory>,
    pub levels: HashMap<String, LogLevel>,
}

impl RegistryConfig {
    /// Empty configuration for `mode`; callers fill in the rest
    pub fn new(mode: LogMode) -> Self {
        Self {
            mode,
            singleton: None,
            factory: None,
            levels: HashMap::new(),
        }
    }

    pub fn singleton(logger: SharedLogger) -> Self {
        Self {
            singleton: Some(logger),
            ..Self::new(LogMode::Singleton)
        }
    }

    pub fn multiplexed(factory: LoggerFactory) -> Self {
        Self {
            factory: Some(factory),
            ..Self::new(LogMode::Multiplexed)
        }
    }

    #[must_use]
    pub fn with_level(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.levels.insert(name.into(), level);
        self
    }

    #[must_use]
    pub fn with_levels<I, K>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = (K, LogLevel)>,
        K: Into<String>,
    {
        self.levels
            .extend(levels.into_iter().map(|(name, level)| (name.into(), level)));
        self
    }

    /// Check that the logger required by the mode is present
    pub fn validate(&self) -> Result<(), LoggerError> {
        match self.mode {
            LogMode::Singleton if self.singleton.is_none() => Err(LoggerError::config(
                "RegistryConfig",
                "a singleton logger must be set for Singleton mode",
            )),
            LogMode::Multiplexed if self.factory.is_none() => Err(LoggerError::config(
                "RegistryConfig",
                "a logger factory must be set for Multiplexed mode",
            )),
            _ => Ok(()),
        }
    }
}

impl Default for RegistryConfig {
    /// What the registry holds before anything is configured
    fn default() -> Self {
        Self::new(LogMode::Multiplexed)
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("mode", &self.mode)
            .field("singleton", &self.singleton.as_ref().map(|l| l.name().to_string()))
            .field("factory", &self.factory.as_ref().map(|_| "<fn>"))
            .field("levels", &self.levels)
            .finish()
    }
}
