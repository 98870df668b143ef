//! # Metrics
//!
//! Prometheus metrics for monitoring the client.
//!
//! ## Metrics Exposed
//!
//! - `vault_reconciler_operations_total` - Remote Vault calls, by operation
//! - `vault_reconciler_operation_errors_total` - Failed remote Vault calls, by operation
//! - `vault_reconciler_operation_duration_seconds` - Duration of remote Vault calls
//! - `vault_reconciler_resources_created_total` - Mounts, auth methods and policies created
//! - `vault_reconciler_attribute_writes_total` - Attribute sets written below a mount
//! - `vault_reconciler_attribute_skips_total` - Oneshot attribute sets skipped on existing mounts

use anyhow::Result;
use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "vault_reconciler_operations_total",
            "Total number of remote Vault operations",
        ),
        &["operation"],
    )
    .expect("Failed to create OPERATIONS_TOTAL metric - this should never happen")
});

static OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "vault_reconciler_operation_errors_total",
            "Total number of failed remote Vault operations",
        ),
        &["operation"],
    )
    .expect("Failed to create OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "vault_reconciler_operation_duration_seconds",
            "Duration of remote Vault operations in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["operation"],
    )
    .expect("Failed to create OPERATION_DURATION metric - this should never happen")
});

static RESOURCES_CREATED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "vault_reconciler_resources_created_total",
            "Total number of resources created by reconciliation",
        ),
        &["kind"],
    )
    .expect("Failed to create RESOURCES_CREATED_TOTAL metric - this should never happen")
});

static ATTRIBUTE_WRITES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "vault_reconciler_attribute_writes_total",
        "Total number of attribute sets written below a mount",
    )
    .expect("Failed to create ATTRIBUTE_WRITES_TOTAL metric - this should never happen")
});

static ATTRIBUTE_SKIPS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "vault_reconciler_attribute_skips_total",
        "Total number of oneshot attribute sets skipped on existing mounts",
    )
    .expect("Failed to create ATTRIBUTE_SKIPS_TOTAL metric - this should never happen")
});

/// Register all metrics with the crate registry
///
/// # Errors
/// Returns an error if a metric is already registered
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(RESOURCES_CREATED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ATTRIBUTE_WRITES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ATTRIBUTE_SKIPS_TOTAL.clone()))?;

    Ok(())
}

/// Render the registry in the Prometheus text exposition format
///
/// # Errors
/// Returns an error if encoding fails
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a completed remote operation and its duration
pub fn record_operation(operation: &str, duration: f64) {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
    OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration);
}

pub fn increment_operation_errors(operation: &str) {
    OPERATION_ERRORS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn increment_resources_created(kind: &str) {
    RESOURCES_CREATED_TOTAL.with_label_values(&[kind]).inc();
}

pub fn increment_attribute_writes() {
    ATTRIBUTE_WRITES_TOTAL.inc();
}

pub fn increment_attribute_skips() {
    ATTRIBUTE_SKIPS_TOTAL.inc();
}
