//! Plain logging settings and their conversion into a registry configuration
//!
//! Settings come from an optional YAML document, then environment variables
//! overlay individual fields: a variable that is set wins over the file.
//!
//! | Variable           | Field          |
//! |--------------------|----------------|
//! | `LOG_CONFIG_FILE`  | file to read   |
//! | `LOG_LEVEL`        | `level`        |
//! | `LOG_FORMAT`       | `format`       |
//! | `LOG_ASYNC_BUFFER` | `async_buffer` |
//! | `LOG_ENV`          | `environment`  |

use crate::backends::StandardLogger;
use crate::core::{
    factory_fn, LogLevel, LoggerError, LoggerFactory, OutputFormat, Result, SharedLogger,
};
use crate::dispatch::AsyncLogger;
use crate::registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub const ENV_CONFIG_FILE: &str = "LOG_CONFIG_FILE";
pub const ENV_LEVEL: &str = "LOG_LEVEL";
pub const ENV_FORMAT: &str = "LOG_FORMAT";
pub const ENV_ASYNC_BUFFER: &str = "LOG_ASYNC_BUFFER";
pub const ENV_ENVIRONMENT: &str = "LOG_ENV";

/// Logging settings as delivered by configuration loading
///
/// # Example
///
/// ```
/// use rust_log_registry::core::LogLevel;
/// use rust_log_registry::settings::LoggingSettings;
///
/// let settings = LoggingSettings::from_yaml_str(
///     "level: debug\nasync_buffer: 128\nlevels:\n  audit: error\n",
/// )
/// .unwrap();
///
/// assert_eq!(settings.level, LogLevel::Debug);
/// assert_eq!(settings.levels.get("audit"), Some(&LogLevel::Error));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Level of every logger without an override
    pub level: LogLevel,
    pub format: OutputFormat,
    /// Wrap each logger in an [`AsyncLogger`] with this queue capacity
    pub async_buffer: Option<usize>,
    /// Added to every record as `env`
    pub environment: Option<String>,
    /// Per-name level overrides
    pub levels: HashMap<String, LogLevel>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: OutputFormat::Text,
            async_buffer: None,
            environment: None,
            levels: HashMap::new(),
        }
    }
}

impl LoggingSettings {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Read the file named by `LOG_CONFIG_FILE` (defaults when unset), then
    /// overlay the process environment.
    pub fn load() -> Result<Self> {
        let mut settings = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(path)?,
            _ => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; absent or empty values leave the field
    /// unchanged. Nothing is applied unless every present value parses.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let level = get(ENV_LEVEL).map(|v| v.parse::<LogLevel>()).transpose()?;
        let format = get(ENV_FORMAT).map(|v| v.parse::<OutputFormat>()).transpose()?;
        let async_buffer = get(ENV_ASYNC_BUFFER)
            .map(|buffer| {
                buffer.trim().parse::<usize>().map_err(|_| {
                    LoggerError::config(
                        ENV_ASYNC_BUFFER,
                        format!("'{}' is not a queue size", buffer),
                    )
                })
            })
            .transpose()?;
        let environment = get(ENV_ENVIRONMENT);

        if let Some(level) = level {
            self.level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(capacity) = async_buffer {
            self.async_buffer = Some(capacity);
        }
        if let Some(environment) = environment {
            self.environment = Some(environment);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.async_buffer == Some(0) {
            return Err(LoggerError::config(
                "LoggingSettings",
                "async_buffer must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Factory building a [`StandardLogger`] per name, wrapped in an
    /// [`AsyncLogger`] when `async_buffer` is set
    pub fn factory(&self) -> Result<LoggerFactory> {
        self.validate()?;

        let level = self.level;
        let format = self.format;
        let environment = self.environment.clone();
        let async_buffer = self.async_buffer;

        Ok(factory_fn(move |name| {
            let mut builder = StandardLogger::builder(name).level(level).format(format);
            if let Some(ref environment) = environment {
                builder = builder.environment(environment.clone());
            }
            let logger: SharedLogger = Arc::new(builder.build());

            let Some(capacity) = async_buffer else {
                return logger;
            };
            match AsyncLogger::from_shared(Arc::clone(&logger), capacity) {
                Ok(async_logger) => Arc::new(async_logger) as SharedLogger,
                Err(e) => {
                    eprintln!(
                        "[LOGGER ERROR] Could not start async dispatch for '{}': {}. \
                         Falling back to synchronous logging.",
                        name, e
                    );
                    logger
                }
            }
        }))
    }

    /// Multiplexed registry configuration with these settings' overrides
    pub fn into_registry_config(self) -> Result<RegistryConfig> {
        let factory = self.factory()?;
        Ok(RegistryConfig::multiplexed(factory).with_levels(self.levels))
    }
}
