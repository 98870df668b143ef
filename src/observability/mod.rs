//! # Observability
//!
//! Prometheus metrics for remote operations and reconciliation outcomes.
//! Logging goes through `tracing` directly at each call site.

pub mod metrics;

pub use metrics::*;
