//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// Sink the reference backend writes rendered records to.
///
/// Appenders are only ever driven from behind the owning logger's lock, so
/// they need `Send` but not `Sync`.
pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
