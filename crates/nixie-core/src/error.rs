//! Error types for Nixie
//!
//! TigerStyle: Explicit error types with context, using thiserror.
//!
//! The enum is `Clone`: a fatal invocation failure is delivered to the caller
//! inside an error response *and* handed to the run loop that tears the
//! callee down, so the same failure must exist in both places. Arbitrary
//! application errors are rendered into the `App` variant at the edge
//! (`From<anyhow::Error>`) rather than stored.

use crate::trace::{Frame, Trace};
use thiserror::Error;

/// Result type alias for Nixie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nixie error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // =========================================================================
    // Invocation Failures
    // =========================================================================
    /// The requested method could not be resolved on the target
    #[error("method not found: {method}")]
    MethodNotFound { method: String, trace: Trace },

    /// The target rejected the call's argument list
    #[error("invalid arguments for {method}: {reason}")]
    InvalidArguments {
        method: String,
        reason: String,
        trace: Trace,
    },

    /// The target's own logic failed
    #[error("invocation failed: {reason}")]
    App { reason: String },

    // =========================================================================
    // Protocol Outcomes
    // =========================================================================
    /// A failure classified as the caller's fault
    ///
    /// The request itself was malformed; the callee survives. Wraps the
    /// original captured failure.
    #[error("caller protocol error: {cause}")]
    CallerProtocol {
        #[source]
        cause: Box<Error>,
    },

    /// The call reached cleanup because the target was already gone
    #[error("target terminated before the call could be dispatched")]
    TargetTerminated,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// The call model rejected construction
    #[error("invalid call: {reason}")]
    InvalidCall { reason: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Create a missing-method failure raised at the miss handler
    ///
    /// The innermost frame is the dynamic-dispatch-miss marker; surfacing
    /// through callee methods is recorded with [`Error::in_method`].
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
            trace: Trace::from_frames([Frame::MissHandler]),
        }
    }

    /// Create an invalid-arguments failure raised on entry to `method`
    ///
    /// Frame 0 names the method being invoked when its argument list was
    /// rejected.
    pub fn invalid_arguments(method: impl Into<String>, reason: impl Into<String>) -> Self {
        let method = method.into();
        Self::InvalidArguments {
            trace: Trace::from_frames([Frame::method(method.as_str())]),
            method,
            reason: reason.into(),
        }
    }

    /// Create an application failure
    pub fn app(reason: impl Into<String>) -> Self {
        Self::App {
            reason: reason.into(),
        }
    }

    /// Wrap a failure classified as the caller's fault
    pub fn caller_protocol(cause: Error) -> Self {
        debug_assert!(
            !cause.is_caller_protocol(),
            "caller protocol errors do not nest"
        );
        Self::CallerProtocol {
            cause: Box::new(cause),
        }
    }

    /// Create an internal error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Record that this failure surfaced through the named callee method
    pub fn in_method(self, name: impl Into<String>) -> Self {
        self.push_frame(Frame::method(name))
    }

    /// Record that this failure crossed the dispatch boundary
    pub fn crossed_boundary(self) -> Self {
        self.push_frame(Frame::Boundary)
    }

    fn push_frame(mut self, frame: Frame) -> Self {
        // Only resolve-time failures carry a trace; other kinds are
        // classified by their variant alone.
        match &mut self {
            Self::MethodNotFound { trace, .. } | Self::InvalidArguments { trace, .. } => {
                trace.push_outer(frame);
            }
            _ => {}
        }
        self
    }

    /// Check whether this failure was classified as the caller's fault
    pub fn is_caller_protocol(&self) -> bool {
        matches!(self, Self::CallerProtocol { .. })
    }

    /// The captured trace, if this failure kind carries one
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            Self::MethodNotFound { trace, .. } | Self::InvalidArguments { trace, .. } => {
                Some(trace)
            }
            Self::CallerProtocol { cause } => cause.trace(),
            _ => None,
        }
    }

    /// The original failure beneath any protocol wrapper
    pub fn cause(&self) -> &Error {
        match self {
            Self::CallerProtocol { cause } => cause,
            other => other,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::App {
            reason: format!("{err:#}"),
        }
    }
}
