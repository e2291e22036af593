//! TigerStyle constants for Nixie
//!
//! All limits are explicit, use big-endian naming (most significant first),
//! and include units in the name.

// =============================================================================
// Call Limits
// =============================================================================

/// Maximum length of a method name in bytes
pub const METHOD_NAME_LENGTH_BYTES_MAX: usize = 128;

/// Maximum number of arguments carried by a single call
pub const CALL_ARGUMENTS_COUNT_MAX: usize = 64;

// =============================================================================
// Trace Limits
// =============================================================================

/// Maximum number of frames carried by an invocation trace
pub const TRACE_FRAMES_COUNT_MAX: usize = 256;

// =============================================================================
// Observability - Metric Names (TigerStyle: explicit, with units)
// =============================================================================

/// Metric: Total number of dispatched calls (counter, labels: method, status)
pub const METRIC_NAME_CALLS_TOTAL: &str = "nixie_calls_total";

/// Metric: Call dispatch duration in seconds (histogram, label: method)
pub const METRIC_NAME_CALL_DURATION_SECONDS: &str = "nixie_call_duration_seconds";

/// Metric: Total number of calls resolved by cleanup (counter)
pub const METRIC_NAME_CLEANUPS_TOTAL: &str = "nixie_cleanups_total";

// Compile-time assertions for constant validity
const _: () = {
    assert!(METHOD_NAME_LENGTH_BYTES_MAX >= 16);
    assert!(CALL_ARGUMENTS_COUNT_MAX >= 8);
    // The caller-fault shape for argument failures needs two frames
    assert!(TRACE_FRAMES_COUNT_MAX >= 2);
};
