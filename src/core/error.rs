//! Error types for the logger registry

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings document could not be parsed
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Unknown or unsupported log level
    #[error("Invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// Logger already stopped
    #[error("Logger '{name}' already stopped")]
    LoggerStopped { name: String },

    /// The caller stopped waiting for the async worker to drain
    #[error("Logger '{name}' did not drain within {timeout:?}")]
    ShutdownTimeout { name: String, timeout: Duration },

    /// The async worker thread panicked
    #[error("Async worker for '{name}' panicked: {message}")]
    WorkerPanicked { name: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    pub fn stopped(name: impl Into<String>) -> Self {
        LoggerError::LoggerStopped { name: name.into() }
    }

    pub fn shutdown_timeout(name: impl Into<String>, timeout: Duration) -> Self {
        LoggerError::ShutdownTimeout {
            name: name.into(),
            timeout,
        }
    }

    pub fn worker_panicked(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::WorkerPanicked {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Whether this error signals an inconsistent logging configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidConfiguration { .. } | LoggerError::InvalidLevel { .. }
        )
    }
}
