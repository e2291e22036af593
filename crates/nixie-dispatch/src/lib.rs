//! Nixie Dispatch
//!
//! The Classifier and Dispatcher of the Nixie call-dispatch protocol.
//!
//! # Overview
//!
//! The scheduler hands a queued call to the [`Dispatcher`], which invokes the
//! target; on failure the [`classifier`] inspects the captured invocation
//! trace to decide whether the caller asked for something invalid (the callee
//! survives and the caller gets a protocol error) or the callee's own logic
//! failed (the caller gets the failure and the run loop tears the callee
//! down).
//!
//! # TigerStyle
//! - Every accepted call resolves exactly once (dispatch or cleanup)
//! - The caller's response is sent before any fatal propagation
//! - No internal locking or suspension; serialization is the scheduler's job

pub mod classifier;
pub mod dispatcher;

pub use classifier::{classify_invalid_arguments, classify_missing_method, Fault};
pub use dispatcher::Dispatcher;
