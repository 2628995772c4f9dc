//! Integration tests for the logger registry
//!
//! These tests verify:
//! - Default logger identity
//! - Per-name caching and level overrides
//! - Rejection of incomplete configurations
//! - Exactly-once construction under concurrent lookups
//! - The process-wide facade

mod common;

use common::RecordingLogger;
use rust_log_registry::prelude::*;
use rust_log_registry::registry::{self, DEFAULT_LOGGER_NAME};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

/// Factory handing out a fresh recording logger per name, counting calls
fn counting_factory(calls: Arc<AtomicUsize>) -> LoggerFactory {
    factory_fn(move |name| {
        calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(RecordingLogger::new(name)) as SharedLogger
    })
}

#[test]
fn test_default_logger_is_idempotent() {
    let registry = LoggerRegistry::new();

    let first = registry.default_logger();
    let second = registry.default_logger();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.name(), DEFAULT_LOGGER_NAME);
}

#[test]
fn test_set_default_replaces_default() {
    let registry = LoggerRegistry::new();
    let before = registry.default_logger();

    let replacement: SharedLogger = Arc::new(RecordingLogger::new("replacement"));
    registry.set_default(Arc::clone(&replacement));

    let after = registry.default_logger();
    assert!(Arc::ptr_eq(&after, &replacement));
    assert!(!Arc::ptr_eq(&after, &before));
}

#[test]
fn test_default_logger_comes_from_active_factory() {
    let registry = LoggerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    registry.set_factory(counting_factory(Arc::clone(&calls)));

    let logger = registry.default_logger();
    registry.default_logger();

    assert_eq!(logger.name(), DEFAULT_LOGGER_NAME);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_named_loggers_are_cached() {
    let registry = LoggerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    registry.set_factory(counting_factory(Arc::clone(&calls)));

    let first = registry.get("orders");
    let second = registry.get("orders");
    let other = registry.get("billing");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.name(), second.name());
    assert_eq!(first.level(), second.level());

    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(other.name(), "billing");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_named_loggers_do_not_share_state() {
    let registry = LoggerRegistry::new();
    registry.set_factory(counting_factory(Arc::new(AtomicUsize::new(0))));

    let a = registry.get("a");
    let b = registry.get("b");
    a.set_level(LogLevel::Error).unwrap();

    assert_eq!(a.level(), LogLevel::Error);
    assert_eq!(b.level(), LogLevel::Info);
}

#[test]
fn test_override_applied_on_first_lookup() {
    let registry = LoggerRegistry::new();
    registry
        .configure(
            RegistryConfig::multiplexed(counting_factory(Arc::new(AtomicUsize::new(0))))
                .with_level("svc-a", LogLevel::Warn),
        )
        .unwrap();

    let logger = registry.get("svc-a");
    assert_eq!(logger.level(), LogLevel::Warn);
    assert_eq!(registry.get("svc-b").level(), LogLevel::Info);
}

#[test]
fn test_override_reapplied_on_cached_lookup() {
    let registry = LoggerRegistry::new();
    registry
        .configure(
            RegistryConfig::multiplexed(counting_factory(Arc::new(AtomicUsize::new(0))))
                .with_level("svc", LogLevel::Warn),
        )
        .unwrap();

    let logger = registry.get("svc");
    // Changed behind the registry's back
    logger.set_level(LogLevel::Debug).unwrap();

    assert_eq!(registry.get("svc").level(), LogLevel::Warn);
}

#[test]
fn test_audit_scenario() {
    let registry = LoggerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    registry
        .configure(
            RegistryConfig::multiplexed(counting_factory(Arc::clone(&calls)))
                .with_level("audit", LogLevel::Error),
        )
        .unwrap();

    let audit = registry.get("audit");
    assert_eq!(audit.level(), LogLevel::Error);

    let again = registry.get("audit");
    assert!(Arc::ptr_eq(&audit, &again));
    assert_eq!(again.level(), LogLevel::Error);

    let other = registry.get("other");
    assert_eq!(other.level(), LogLevel::Info);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_records_gated_by_override() {
    let registry = LoggerRegistry::new();
    let backend = RecordingLogger::new("audit");
    let handle = backend.clone();
    registry
        .configure(
            RegistryConfig::multiplexed(factory_fn(move |_| {
                Arc::new(backend.clone()) as SharedLogger
            }))
            .with_level("audit", LogLevel::Warn),
        )
        .unwrap();

    let audit = registry.get("audit");
    let ctx = LogContext::new();
    rust_log_registry::debug!(audit, &ctx, "hidden");
    rust_log_registry::info!(audit, &ctx, "hidden");
    rust_log_registry::warn!(audit, &ctx, "shown");
    rust_log_registry::error!(audit, &ctx, "disk full", "also shown");

    assert_eq!(handle.messages(), vec!["shown", "also shown"]);
}

#[test]
fn test_singleton_mode_installs_default() {
    let registry = LoggerRegistry::new();
    registry.set_factory(counting_factory(Arc::new(AtomicUsize::new(0))));
    let jobs = registry.get("jobs");
    jobs.set_level(LogLevel::Warn).unwrap();

    let singleton: SharedLogger = Arc::new(RecordingLogger::new("app"));
    registry
        .configure(RegistryConfig::singleton(Arc::clone(&singleton)))
        .unwrap();

    assert_eq!(registry.mode(), LogMode::Singleton);
    assert!(Arc::ptr_eq(&registry.default_logger(), &singleton));

    // Loggers already cached by name are left alone
    let after = registry.get("jobs");
    assert!(Arc::ptr_eq(&jobs, &after));
    assert_eq!(after.level(), LogLevel::Warn);
}

#[test]
fn test_level_override_only_set_when_needed() {
    let plain = RecordingLogger::new("plain");
    let audit = RecordingLogger::new("audit");
    let (plain_handle, audit_handle) = (plain.clone(), audit.clone());

    let registry = LoggerRegistry::new();
    registry
        .configure(
            RegistryConfig::multiplexed(factory_fn(move |name| {
                let logger = if name == "audit" { audit.clone() } else { plain.clone() };
                Arc::new(logger) as SharedLogger
            }))
            .with_level("audit", LogLevel::Error),
        )
        .unwrap();

    // No override: the logger's level is never touched
    for _ in 0..3 {
        registry.get("plain");
    }
    assert_eq!(plain_handle.set_level_calls(), 0);

    // Differing level: exactly one call on creation
    registry.get("audit");
    assert_eq!(audit_handle.set_level_calls(), 1);
    assert_eq!(audit_handle.level(), LogLevel::Error);

    // Already matching: later lookups add no calls
    registry.get("audit");
    registry.get("audit");
    assert_eq!(audit_handle.set_level_calls(), 1);
}

#[test]
fn test_multiplexed_mode_keeps_cached_loggers() {
    let registry = LoggerRegistry::new();
    registry.set_factory(counting_factory(Arc::new(AtomicUsize::new(0))));
    let before = registry.get("jobs");

    let calls = Arc::new(AtomicUsize::new(0));
    registry
        .configure(RegistryConfig::multiplexed(counting_factory(Arc::clone(&calls))))
        .unwrap();

    assert!(Arc::ptr_eq(&before, &registry.get("jobs")));
    registry.get("fresh");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_singleton_without_logger_is_rejected() {
    let registry = LoggerRegistry::new();
    let err = registry
        .configure(RegistryConfig::new(LogMode::Singleton))
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(registry.mode(), LogMode::Multiplexed);
}

#[test]
fn test_multiplexed_without_factory_is_rejected() {
    let registry = LoggerRegistry::new();
    let err = registry
        .configure(RegistryConfig::new(LogMode::Multiplexed).with_level("svc", LogLevel::Error))
        .unwrap_err();

    assert!(err.is_configuration());
    // Rejected configurations leave nothing behind
    assert_eq!(registry.level_of("svc"), None);
}

#[test]
fn test_unknown_mode_is_rejected() {
    let err = LogMode::try_from(999u32).unwrap_err();
    assert!(err.is_configuration());

    assert!("broadcast".parse::<LogMode>().unwrap_err().is_configuration());
    assert_eq!(LogMode::try_from(0u32).unwrap(), LogMode::Singleton);
    assert_eq!(LogMode::try_from(1u32).unwrap(), LogMode::Multiplexed);
}

#[test]
fn test_set_level_updates_cached_logger() {
    let registry = LoggerRegistry::new();
    registry.set_factory(counting_factory(Arc::new(AtomicUsize::new(0))));
    let logger = registry.get("svc");

    registry.set_level("svc", LogLevel::Debug).unwrap();

    assert_eq!(logger.level(), LogLevel::Debug);
    assert_eq!(registry.level_of("svc"), Some(LogLevel::Debug));
}

#[test]
fn test_set_level_failure_leaves_overrides_untouched() {
    let registry = LoggerRegistry::new();
    let stubborn = RecordingLogger::new("stubborn").rejecting_levels();
    registry.set_factory(factory_fn(move |_| Arc::new(stubborn.clone()) as SharedLogger));
    registry.get("stubborn");

    let err = registry.set_level("stubborn", LogLevel::Error).unwrap_err();

    assert!(matches!(err, LoggerError::InvalidLevel { .. }));
    assert_eq!(registry.level_of("stubborn"), None);
}

#[test]
fn test_concurrent_lookups_construct_once() {
    let registry = Arc::new(LoggerRegistry::new());
    let calls = Arc::new(AtomicUsize::new(0));
    registry.set_factory(counting_factory(Arc::clone(&calls)));

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (registry.get("shared"), registry.default_logger())
            })
        })
        .collect();

    let results: Vec<(SharedLogger, SharedLogger)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    // One "shared" plus one default
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    for (named, default) in &results[1..] {
        assert!(Arc::ptr_eq(named, &results[0].0));
        assert!(Arc::ptr_eq(default, &results[0].1));
    }
}

#[test]
fn test_shutdown_all_shuts_each_logger_once() {
    let registry = LoggerRegistry::new();
    let shared = RecordingLogger::new("shared");
    let handle = shared.clone();
    let shared: SharedLogger = Arc::new(shared);

    let for_factory = Arc::clone(&shared);
    registry.set_factory(factory_fn(move |_| Arc::clone(&for_factory)));
    registry.set_default(Arc::clone(&shared));
    registry.get("a");
    registry.get("b");

    registry.shutdown_all().unwrap();

    assert_eq!(handle.shutdown_calls(), 1);
    assert!(registry.names().is_empty());
}

#[test]
fn test_global_facade() {
    // The only test touching process-wide state
    registry::reset();

    let calls = Arc::new(AtomicUsize::new(0));
    registry::configure(
        RegistryConfig::multiplexed(counting_factory(Arc::clone(&calls)))
            .with_level("audit", LogLevel::Error),
    )
    .unwrap();

    let audit = registry::named("audit");
    assert_eq!(audit.level(), LogLevel::Error);
    assert!(Arc::ptr_eq(&audit, &registry::named("audit")));

    registry::set_level("audit", LogLevel::Warn).unwrap();
    assert_eq!(audit.level(), LogLevel::Warn);

    let app: SharedLogger = Arc::new(RecordingLogger::new("app"));
    registry::set_logger(Arc::clone(&app));
    assert!(Arc::ptr_eq(&registry::logger(), &app));

    registry::shutdown_all().unwrap();
    registry::reset();
    assert_eq!(registry::global().mode(), LogMode::Multiplexed);
    assert!(registry::global().names().is_empty());
}
