//! Orchestration on top of the sales pipeline: the per-input memo cache and
//! the engine that ties config, input adapters and aggregation together.

pub mod cache;
pub mod engine;

pub use cache::{ContentHash, ReportCache};
pub use engine::MetricsEngine;
