//! Target contract
//!
//! The callee side of the dispatch protocol: any value that can receive a
//! requested method invocation.

use crate::call::{Continuation, MethodName};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A value that dispatched calls execute against
///
/// Execution is single-threaded: the external scheduler serializes dispatches
/// against a given target, so `invoke` takes `&mut self` and no internal
/// locking is needed.
///
/// # Failure contract
///
/// - A method that cannot be resolved fails with
///   [`Error::method_not_found`](crate::Error::method_not_found).
/// - An argument list rejected on entry fails with
///   [`Error::invalid_arguments`](crate::Error::invalid_arguments).
/// - A failure surfacing through the target's own methods records them with
///   [`Error::in_method`](crate::Error::in_method); anything else is the
///   target's own logic failing.
/// - Returning an already-wrapped
///   [`CallerProtocol`](crate::Error::CallerProtocol) failure is an explicit
///   abort: the caller gets the error and the target survives.
#[async_trait]
pub trait Target: Send {
    /// Execute the requested method
    ///
    /// # Arguments
    /// * `method` - The requested method name
    /// * `arguments` - Ordered argument values
    /// * `continuation` - Opaque callable forwarded verbatim from the caller
    async fn invoke(
        &mut self,
        method: &MethodName,
        arguments: &[Value],
        continuation: Option<&Continuation>,
    ) -> Result<Value>;
}
