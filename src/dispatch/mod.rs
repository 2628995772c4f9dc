//! Asynchronous dispatch of log calls

pub mod async_logger;
pub mod metrics;

pub use async_logger::{
    AsyncLogger, DispatchState, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use metrics::DispatchMetrics;
