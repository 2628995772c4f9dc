//! Logger backends

pub mod standard;

pub use standard::{default_factory, ContextExtractor, StandardLogger, StandardLoggerBuilder};
