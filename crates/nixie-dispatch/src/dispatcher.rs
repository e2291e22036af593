//! Call dispatch against a single-threaded target
//!
//! TigerStyle: Every accepted call resolves exactly once; the caller's
//! response is sent before any fatal propagation.
//!
//! The external scheduler serializes dispatches per target and owns
//! supervision after a fatal return; the dispatcher itself introduces no
//! suspension or locking of its own.

use crate::classifier::{classify_invalid_arguments, classify_missing_method, Fault};
use nixie_core::metrics;
use nixie_core::{AsyncCall, Call, Error, Response, Result, SyncCall, Target, Value};
use std::time::Instant;
use tracing::{debug, instrument};

// Per-call status labels recorded to metrics
const STATUS_SUCCESS: &str = "success";
const STATUS_ABORT: &str = "abort";
const STATUS_ERROR: &str = "error";

/// Executes call requests against targets and resolves their outcomes
///
/// The dispatcher holds no state: the response destination travels inside
/// each [`SyncCall`], and at most one dispatch runs against a given target at
/// a time, serialized by the external scheduler.
#[derive(Debug, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new() -> Self {
        Self
    }

    /// Dispatch a synchronous call
    ///
    /// Delivers exactly one [`Response`] to the caller (best-effort) and
    /// returns `Ok` if the callee survives. An `Err` return carries a failure
    /// the run loop must tear the callee down for; the response has already
    /// been delivered by then, so the caller never observes only silence on a
    /// fatal callee failure.
    #[instrument(
        skip_all,
        fields(method = %call.call().method(), task = call.task().raw()),
        level = "debug"
    )]
    pub async fn dispatch_sync(&self, call: SyncCall, target: &mut dyn Target) -> Result<()> {
        let (call, caller, _task) = call.into_parts();
        let start = Instant::now();

        let result = Self::invoke(&call, target).await;
        let duration_seconds = start.elapsed().as_secs_f64();

        match result {
            Ok(value) => {
                metrics::record_call(call.method().as_str(), STATUS_SUCCESS, duration_seconds);
                // The caller may already be gone; a missed delivery is a
                // routine race, not an error.
                let _ = caller.send(Response::Success { call, value });
                Ok(())
            }
            Err(failure) => {
                let failure = Self::classify(&call, failure);
                let abort = failure.is_caller_protocol();
                let status = if abort { STATUS_ABORT } else { STATUS_ERROR };
                metrics::record_call(call.method().as_str(), status, duration_seconds);

                let _ = caller.send(Response::Error {
                    call,
                    failure: failure.clone(),
                });

                if abort {
                    // Protocol error on the caller's part: the callee
                    // survives.
                    Ok(())
                } else {
                    Err(failure)
                }
            }
        }
    }

    /// Dispatch an asynchronous call
    ///
    /// No response destination exists. A failure classified as the caller's
    /// fault is logged at debug level and swallowed; anything else is
    /// returned for the run loop to tear the callee down, identically to the
    /// synchronous fatal path, but with no response to send.
    #[instrument(skip_all, fields(method = %call.call().method()), level = "debug")]
    pub async fn dispatch_async(&self, call: AsyncCall, target: &mut dyn Target) -> Result<()> {
        let call = call.into_inner();
        let start = Instant::now();

        let result = Self::invoke(&call, target).await;
        let duration_seconds = start.elapsed().as_secs_f64();

        match result {
            Ok(_value) => {
                // Fire-and-forget: the returned value has nowhere to go.
                metrics::record_call(call.method().as_str(), STATUS_SUCCESS, duration_seconds);
                Ok(())
            }
            Err(failure) => match Self::classify(&call, failure) {
                Error::CallerProtocol { cause } => {
                    metrics::record_call(call.method().as_str(), STATUS_ABORT, duration_seconds);
                    debug!(method = %call.method(), cause = %cause, "async call aborted");
                    Ok(())
                }
                failure => {
                    metrics::record_call(call.method().as_str(), STATUS_ERROR, duration_seconds);
                    Err(failure)
                }
            },
        }
    }

    /// Resolve a call whose target terminated before dispatch could begin
    ///
    /// Invoked by the scheduler instead of dispatch; the target is never
    /// invoked. A given call reaches exactly one of dispatch or cleanup -
    /// move semantics enforce it.
    pub fn cleanup(&self, call: SyncCall) {
        let (call, caller, _task) = call.into_parts();
        metrics::record_cleanup();
        let _ = caller.send(Response::Error {
            call,
            failure: Error::TargetTerminated,
        });
    }

    /// Invoke the target, stamping the dispatch-boundary marker onto any
    /// trace-carrying failure that crosses back out
    async fn invoke(call: &Call, target: &mut dyn Target) -> Result<Value> {
        target
            .invoke(call.method(), call.arguments(), call.continuation())
            .await
            .map_err(Error::crossed_boundary)
    }

    /// Classify an eligible failure, substituting the caller-fault wrapper
    ///
    /// A failure that is already a protocol error - an explicit abort by the
    /// target - is respected as-is.
    fn classify(call: &Call, failure: Error) -> Error {
        let caller_fault = match &failure {
            Error::MethodNotFound { trace, .. } => {
                classify_missing_method(trace) == Fault::Caller
            }
            Error::InvalidArguments { trace, .. } => {
                classify_invalid_arguments(trace, call.method()) == Fault::Caller
            }
            Error::CallerProtocol { .. } => return failure,
            _ => false,
        };

        if caller_fault {
            Error::caller_protocol(failure)
        } else {
            failure
        }
    }
}
