//! Name → logger resolution with per-name level overrides

use super::config::{LogMode, RegistryConfig};
use crate::backends::default_factory;
use crate::core::{LogLevel, LoggerError, LoggerFactory, Result, SharedLogger};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name given to the lazily created default logger
pub const DEFAULT_LOGGER_NAME: &str = "default";

struct RegistryState {
    current: Option<SharedLogger>,
    cache: HashMap<String, SharedLogger>,
    config: RegistryConfig,
    factory: LoggerFactory,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            current: None,
            cache: HashMap::new(),
            config: RegistryConfig::default(),
            factory: default_factory(),
        }
    }
}

/// Resolves logical names to logger instances.
///
/// All state sits behind one mutex. Factories run while it is held, so a
/// factory must not call back into the same registry.
///
/// # Example
///
/// ```
/// use rust_log_registry::backends::default_factory;
/// use rust_log_registry::core::{LogLevel, Logger};
/// use rust_log_registry::registry::{LoggerRegistry, RegistryConfig};
/// use std::sync::Arc;
///
/// let registry = LoggerRegistry::new();
/// registry
///     .configure(RegistryConfig::multiplexed(default_factory()).with_level("audit", LogLevel::Error))
///     .unwrap();
///
/// let audit = registry.get("audit");
/// assert_eq!(audit.level(), LogLevel::Error);
/// assert!(Arc::ptr_eq(&audit, &registry.get("audit")));
/// ```
pub struct LoggerRegistry {
    state: Mutex<RegistryState>,
}

impl LoggerRegistry {
    /// Registry with the stock factory and no configuration
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::new()),
        }
    }

    /// The process-wide default logger, built on first use
    pub fn default_logger(&self) -> SharedLogger {
        let mut state = self.state.lock();
        if let Some(ref current) = state.current {
            return Arc::clone(current);
        }

        let logger = (state.factory)(DEFAULT_LOGGER_NAME);
        state.current = Some(Arc::clone(&logger));
        logger
    }

    /// Replace the default logger
    pub fn set_default(&self, logger: SharedLogger) {
        self.state.lock().current = Some(logger);
    }

    /// Replace the factory used for names not yet cached
    pub fn set_factory(&self, factory: LoggerFactory) {
        self.state.lock().factory = factory;
    }

    /// Logger for `name`, built through the active factory the first time.
    ///
    /// Every lookup, cached or not, reconciles the logger's level with the
    /// configured override for its name.
    pub fn get(&self, name: &str) -> SharedLogger {
        let mut state = self.state.lock();

        let cached = state.cache.get(name).cloned();
        let logger = match cached {
            Some(existing) => existing,
            None => {
                let created = (state.factory)(name);
                state.cache.insert(name.to_string(), Arc::clone(&created));
                created
            }
        };

        Self::apply_level_override(&state.config.levels, &logger);
        logger
    }

    fn apply_level_override(levels: &HashMap<String, LogLevel>, logger: &SharedLogger) {
        let Some(&wanted) = levels.get(logger.name()) else {
            return;
        };

        if logger.level() != wanted {
            if let Err(e) = logger.set_level(wanted) {
                eprintln!(
                    "[LOGGER WARNING] Could not apply level {} to logger '{}': {}",
                    wanted,
                    logger.name(),
                    e
                );
            }
        }
    }

    /// Replace the active configuration.
    ///
    /// `Singleton` installs the configured logger as the default;
    /// `Multiplexed` installs the configured factory for future lookups.
    /// Loggers already cached by name are left as they are. An incomplete
    /// configuration is rejected and the registry is not modified.
    pub fn configure(&self, config: RegistryConfig) -> Result<()> {
        config.validate()?;

        let mut state = self.state.lock();
        match config.mode {
            LogMode::Singleton => state.current = config.singleton.clone(),
            LogMode::Multiplexed => {
                if let Some(ref factory) = config.factory {
                    state.factory = Arc::clone(factory);
                }
            }
        }
        state.config = config;
        Ok(())
    }

    /// Record an override for `name` and apply it to the cached logger, if
    /// any. A rejected level leaves the registry untouched.
    pub fn set_level(&self, name: &str, level: LogLevel) -> Result<()> {
        let mut state = self.state.lock();

        if let Some(logger) = state.cache.get(name) {
            logger.set_level(level)?;
        }
        state.config.levels.insert(name.to_string(), level);
        Ok(())
    }

    /// Configured override for `name`
    pub fn level_of(&self, name: &str) -> Option<LogLevel> {
        self.state.lock().config.levels.get(name).copied()
    }

    pub fn mode(&self) -> LogMode {
        self.state.lock().config.mode
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().cache.contains_key(name)
    }

    /// Names of cached loggers, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().cache.keys().cloned().collect();
        names.sort();
        names
    }

    /// Shut down every registered logger once and forget them.
    ///
    /// The lock is released before any logger is shut down, since draining
    /// an async logger can take arbitrarily long. Every logger is attempted;
    /// the first failure is returned.
    pub fn shutdown_all(&self) -> Result<()> {
        let loggers = {
            let mut state = self.state.lock();
            let mut loggers: Vec<SharedLogger> = Vec::with_capacity(state.cache.len() + 1);
            for logger in state.current.take().into_iter().chain(state.cache.drain().map(|(_, l)| l)) {
                let address = Arc::as_ptr(&logger) as *const ();
                if !loggers.iter().any(|seen| Arc::as_ptr(seen) as *const () == address) {
                    loggers.push(logger);
                }
            }
            loggers
        };

        let mut first_error: Option<LoggerError> = None;
        for logger in loggers {
            if let Err(e) = logger.shutdown() {
                eprintln!("[LOGGER ERROR] Failed to shut down logger '{}': {}", logger.name(), e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Back to the freshly constructed state.
    ///
    /// The old loggers are released after the lock, since dropping an
    /// [`AsyncLogger`](crate::dispatch::AsyncLogger) drains its queue.
    pub fn reset(&self) {
        let previous = std::mem::replace(&mut *self.state.lock(), RegistryState::new());
        drop(previous);
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LoggerRegistry")
            .field("default", &state.current.as_ref().map(|l| l.name().to_string()))
            .field("cached", &state.cache.len())
            .field("config", &state.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::StandardLogger;
    use crate::core::factory_fn;

    #[test]
    fn test_default_logger_is_lazy_and_stable() {
        let registry = LoggerRegistry::new();
        let first = registry.default_logger();
        let second = registry.default_logger();

        assert_eq!(first.name(), DEFAULT_LOGGER_NAME);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_default_is_not_cached_by_name() {
        let registry = LoggerRegistry::new();
        registry.default_logger();
        assert!(!registry.contains(DEFAULT_LOGGER_NAME));
    }

    #[test]
    fn test_set_level_records_override_before_creation() {
        let registry = LoggerRegistry::new();
        registry.set_level("late", LogLevel::Debug).unwrap();

        assert_eq!(registry.level_of("late"), Some(LogLevel::Debug));
        assert_eq!(registry.get("late").level(), LogLevel::Debug);
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = LoggerRegistry::new();
        registry.set_factory(factory_fn(|name| {
            Arc::new(StandardLogger::new(name)) as SharedLogger
        }));
        registry.get("zeta");
        registry.get("alpha");

        assert_eq!(registry.names(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let registry = LoggerRegistry::new();
        registry.set_level("svc", LogLevel::Error).unwrap();
        registry.get("svc");

        registry.reset();

        assert!(!registry.contains("svc"));
        assert_eq!(registry.level_of("svc"), None);
        assert_eq!(registry.mode(), LogMode::Multiplexed);
    }

    #[test]
    fn test_reset_releases_lock_before_dropping_loggers() {
        use crate::core::{BoxError, LogContext, Logger};
        use crate::dispatch::AsyncLogger;
        use std::sync::mpsc;
        use std::time::Duration;

        // Slow backend whose queued records keep the async drop busy
        struct Slow;

        impl Logger for Slow {
            fn name(&self) -> &str {
                "slow"
            }
            fn level(&self) -> LogLevel {
                LogLevel::Info
            }
            fn set_level(&self, _level: LogLevel) -> Result<()> {
                Ok(())
            }
            fn debug(&self, _ctx: &LogContext, _args: fmt::Arguments<'_>) {}
            fn info(&self, _ctx: &LogContext, _args: fmt::Arguments<'_>) {
                std::thread::sleep(Duration::from_millis(100));
            }
            fn warn(&self, _ctx: &LogContext, _args: fmt::Arguments<'_>) {}
            fn error(&self, _ctx: &LogContext, _message: &str, _err: BoxError) {}
            fn shutdown(&self) -> Result<()> {
                Ok(())
            }
        }

        let registry = Arc::new(LoggerRegistry::new());
        registry.set_factory(factory_fn(|_| {
            match AsyncLogger::with_capacity(Slow, 16) {
                Ok(logger) => Arc::new(logger) as SharedLogger,
                Err(_) => Arc::new(StandardLogger::new("fallback")) as SharedLogger,
            }
        }));
        {
            let slow = registry.get("slow");
            for _ in 0..5 {
                slow.info(&LogContext::new(), format_args!("queued"));
            }
        }

        let (done_tx, done_rx) = mpsc::channel();
        let resetter = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry.reset();
                done_tx.send(()).ok();
            })
        };

        // Wait until the old state has been swapped out
        while registry.contains("slow") {
            std::thread::sleep(Duration::from_millis(1));
        }
        // The drain of roughly 500ms runs without the lock held
        assert!(registry.state.try_lock_for(Duration::from_millis(100)).is_some());
        assert!(done_rx.try_recv().is_err());

        resetter.join().unwrap();
        done_rx.recv().unwrap();
    }

    #[test]
    fn test_shutdown_all_clears_registry() {
        let registry = LoggerRegistry::new();
        let default = registry.default_logger();
        registry.get("a");
        registry.set_default(Arc::clone(&default));

        registry.shutdown_all().unwrap();

        assert!(registry.names().is_empty());
        assert!(!Arc::ptr_eq(&default, &registry.default_logger()));
    }
}
