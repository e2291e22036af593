//! Nixie Core
//!
//! Core types for the Nixie call-dispatch protocol: the call request model,
//! structured invocation traces, the error taxonomy, the response channel
//! that links a blocked caller to its callee, and the target contract.
//!
//! # Overview
//!
//! Nixie is the call-dispatch and failure-classification core of an
//! actor-style runtime. An actor is a single-threaded execution context; a
//! [`Call`] describes one requested method invocation against it, either
//! synchronous ([`SyncCall`], response expected) or asynchronous
//! ([`AsyncCall`], fire-and-forget). The dispatcher (in `nixie-dispatch`)
//! executes the call and resolves every failure into a delivered value, a
//! non-fatal protocol abort the callee survives, or a fatal condition that
//! terminates the callee.
//!
//! The run loop/scheduler, mailbox transport, and supervision policy are
//! external collaborators; this crate only defines the contracts they plug
//! into.
//!
//! # TigerStyle
//!
//! This crate follows [TigerStyle](https://github.com/tigerbeetle/tigerbeetle/blob/main/docs/TIGER_STYLE.md)
//! engineering principles:
//! - Explicit limits with big-endian naming (e.g., `CALL_ARGUMENTS_COUNT_MAX`)
//! - Expected races modeled as values, not failures ([`Delivery::Gone`])
//! - At-most-once response delivery enforced by ownership

pub mod call;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod response;
pub mod target;
pub mod telemetry;
pub mod trace;

pub use call::{AsyncCall, Call, Continuation, MethodName, SyncCall, TaskToken};
pub use constants::*;
pub use error::{Error, Result};
pub use response::{response_channel, Delivery, Response, ResponseReceiver, ResponseSender};
pub use target::Target;
pub use telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use trace::{Frame, Trace};

/// Dynamic argument and return values
pub use serde_json::Value;
