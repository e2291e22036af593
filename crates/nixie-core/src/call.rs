//! Call request model
//!
//! TigerStyle: Explicit validation on construction, immutable after.
//!
//! A [`Call`] describes one requested invocation against an actor's
//! single-threaded execution context. The scheduler creates it when a request
//! is accepted; the dispatcher consumes it exactly once, by either the normal
//! path or the cleanup path, and move semantics enforce that.

use crate::constants::{CALL_ARGUMENTS_COUNT_MAX, METHOD_NAME_LENGTH_BYTES_MAX};
use crate::error::{Error, Result};
use crate::response::ResponseSender;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// MethodName
// =============================================================================

/// Name of a method requested on a target
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct MethodName(String);

impl MethodName {
    /// Create a new MethodName with validation
    ///
    /// # Errors
    /// Returns error if the name is empty, exceeds the length limit, or is
    /// not an identifier (alphanumeric and underscore, not starting with a
    /// digit).
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(Error::InvalidCall {
                reason: "method name must not be empty".into(),
            });
        }

        if name.len() > METHOD_NAME_LENGTH_BYTES_MAX {
            return Err(Error::InvalidCall {
                reason: format!(
                    "method name length {} exceeds limit {}",
                    name.len(),
                    METHOD_NAME_LENGTH_BYTES_MAX
                ),
            });
        }

        let mut chars = name.chars();
        let head_valid = chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_');
        if !head_valid || !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return Err(Error::InvalidCall {
                reason: format!("method name is not an identifier: {}", name),
            });
        }

        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TaskToken
// =============================================================================

/// Opaque originating-context id for a synchronous call
///
/// Carried through unchanged; meaningful only to the external scheduler.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaskToken(u64);

impl TaskToken {
    /// Create a token from the scheduler's raw id
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id back
    pub const fn raw(self) -> u64 {
        self.0
    }
}

// =============================================================================
// Continuation
// =============================================================================

/// Opaque callable forwarded verbatim to the target
///
/// The dispatcher applies no special handling; whether and how often it is
/// invoked is between the caller and the target.
pub struct Continuation(Box<dyn Fn(Value) + Send + Sync>);

impl Continuation {
    /// Wrap a callable
    pub fn new(f: impl Fn(Value) + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Invoke the callable with `value`
    pub fn call(&self, value: Value) {
        (self.0)(value);
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Continuation(..)")
    }
}

// =============================================================================
// Call
// =============================================================================

/// A request to execute a method against an actor
///
/// Immutable once constructed; holds no resources of its own.
pub struct Call {
    method: MethodName,
    arguments: Vec<Value>,
    continuation: Option<Continuation>,
}

impl Call {
    /// Create a new Call with validation
    ///
    /// # Errors
    /// Returns error if the argument count exceeds the limit.
    pub fn new(method: MethodName, arguments: Vec<Value>) -> Result<Self> {
        if arguments.len() > CALL_ARGUMENTS_COUNT_MAX {
            return Err(Error::InvalidCall {
                reason: format!(
                    "argument count {} exceeds limit {}",
                    arguments.len(),
                    CALL_ARGUMENTS_COUNT_MAX
                ),
            });
        }

        Ok(Self {
            method,
            arguments,
            continuation: None,
        })
    }

    /// Attach a continuation to forward to the target
    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }

    /// The requested method
    pub fn method(&self) -> &MethodName {
        &self.method
    }

    /// The ordered argument values
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// The continuation, if one was attached
    pub fn continuation(&self) -> Option<&Continuation> {
        self.continuation.as_ref()
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .field("continuation", &self.continuation)
            .finish()
    }
}

// =============================================================================
// SyncCall
// =============================================================================

/// Synchronous call: the caller is blocked awaiting a response
///
/// Owns the one-shot response sender; the dispatcher only invokes it
/// transiently. Delivering the response is what unblocks the caller.
#[derive(Debug)]
pub struct SyncCall {
    call: Call,
    caller: ResponseSender,
    task: TaskToken,
}

impl SyncCall {
    /// Create a new synchronous call
    pub fn new(call: Call, caller: ResponseSender, task: TaskToken) -> Self {
        Self { call, caller, task }
    }

    /// The underlying request
    pub fn call(&self) -> &Call {
        &self.call
    }

    /// The originating-context token, carried through unchanged
    pub fn task(&self) -> TaskToken {
        self.task
    }

    /// Split into the request and its response destination
    pub fn into_parts(self) -> (Call, ResponseSender, TaskToken) {
        (self.call, self.caller, self.task)
    }
}

// =============================================================================
// AsyncCall
// =============================================================================

/// Asynchronous call: fire-and-forget, no response destination
#[derive(Debug)]
pub struct AsyncCall {
    call: Call,
}

impl AsyncCall {
    /// Create a new asynchronous call
    pub fn new(call: Call) -> Self {
        Self { call }
    }

    /// The underlying request
    pub fn call(&self) -> &Call {
        &self.call
    }

    /// Unwrap the request
    pub fn into_inner(self) -> Call {
        self.call
    }
}
