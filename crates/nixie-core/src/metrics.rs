//! Metrics collection for Nixie
//!
//! TigerStyle: Explicit metric names with units, type-safe recording.
//!
//! High-level recording functions over OpenTelemetry instruments. Without the
//! `otel` feature every function is a no-op.

#[cfg(feature = "otel")]
use crate::constants::*;
#[cfg(feature = "otel")]
use once_cell::sync::Lazy;
#[cfg(feature = "otel")]
use opentelemetry::metrics::{Counter, Histogram};
#[cfg(feature = "otel")]
use opentelemetry::{global, KeyValue};

// Cached instruments (created once, reused for all recordings)
#[cfg(feature = "otel")]
static CALLS_COUNTER: Lazy<Counter<u64>> = Lazy::new(|| {
    global::meter("nixie")
        .u64_counter(METRIC_NAME_CALLS_TOTAL)
        .with_description("Total number of dispatched calls")
        .init()
});

#[cfg(feature = "otel")]
static CALL_DURATION_HISTOGRAM: Lazy<Histogram<f64>> = Lazy::new(|| {
    global::meter("nixie")
        .f64_histogram(METRIC_NAME_CALL_DURATION_SECONDS)
        .with_description("Call dispatch duration in seconds")
        .init()
});

#[cfg(feature = "otel")]
static CLEANUPS_COUNTER: Lazy<Counter<u64>> = Lazy::new(|| {
    global::meter("nixie")
        .u64_counter(METRIC_NAME_CLEANUPS_TOTAL)
        .with_description("Total number of calls resolved by cleanup")
        .init()
});

/// Record a dispatched call
///
/// # Arguments
/// * `method` - The requested method name
/// * `status` - Status: "success", "abort", or "error"
/// * `duration_seconds` - Duration in seconds
#[cfg(feature = "otel")]
pub fn record_call(method: &str, status: &str, duration_seconds: f64) {
    CALLS_COUNTER.add(
        1,
        &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ],
    );

    CALL_DURATION_HISTOGRAM.record(
        duration_seconds,
        &[KeyValue::new("method", method.to_string())],
    );
}

/// Record a call resolved by the cleanup path
#[cfg(feature = "otel")]
pub fn record_cleanup() {
    CLEANUPS_COUNTER.add(1, &[]);
}

// No-op implementations when otel feature is disabled
#[cfg(not(feature = "otel"))]
pub fn record_call(_method: &str, _status: &str, _duration_seconds: f64) {}

#[cfg(not(feature = "otel"))]
pub fn record_cleanup() {}
