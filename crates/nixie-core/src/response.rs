//! Response delivery for synchronous calls
//!
//! TigerStyle: At-most-once delivery enforced by ownership, expected races
//! modeled as values.
//!
//! The response channel is the only cross-context synchronization point in
//! this core: the caller blocks on its [`ResponseReceiver`] and delivering
//! the [`Response`] is what unblocks it. Delivery can race with the caller
//! having already exited; that outcome is [`Delivery::Gone`], a routine
//! result rather than a failure - the core has no way to know the caller is
//! gone until it tries.

use crate::call::Call;
use crate::error::{Error, Result};
use serde_json::Value;
use tokio::sync::oneshot;

// =============================================================================
// Response
// =============================================================================

/// Outcome of executing a call, correlated to it by carrying it back
#[derive(Debug)]
pub enum Response {
    /// The target method returned normally
    Success { call: Call, value: Value },
    /// The target method failed
    Error { call: Call, failure: Error },
}

impl Response {
    /// The call this response resolves
    pub fn call(&self) -> &Call {
        match self {
            Response::Success { call, .. } | Response::Error { call, .. } => call,
        }
    }

    /// Check whether the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Unwrap into the value the caller asked for
    pub fn into_result(self) -> Result<Value> {
        match self {
            Response::Success { value, .. } => Ok(value),
            Response::Error { failure, .. } => Err(failure),
        }
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// Outcome of a best-effort delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The caller received the response
    Delivered,
    /// The caller already exited; the response was discarded
    Gone,
}

// =============================================================================
// Channel
// =============================================================================

/// Create a linked response channel for one synchronous call
pub fn response_channel() -> (ResponseSender, ResponseReceiver) {
    let (tx, rx) = oneshot::channel();
    (ResponseSender { tx }, ResponseReceiver { rx })
}

/// Sending half of a response channel
///
/// Used exactly once; `send` consumes the sender, so at-most-once delivery
/// holds by construction.
#[derive(Debug)]
pub struct ResponseSender {
    tx: oneshot::Sender<Response>,
}

impl ResponseSender {
    /// Deliver the response to the blocked caller
    ///
    /// Non-blocking and never panics. A gone caller is reported, not raised,
    /// and must not be retried or escalated.
    pub fn send(self, response: Response) -> Delivery {
        match self.tx.send(response) {
            Ok(()) => Delivery::Delivered,
            Err(_discarded) => Delivery::Gone,
        }
    }
}

/// Receiving half of a response channel
#[derive(Debug)]
pub struct ResponseReceiver {
    rx: oneshot::Receiver<Response>,
}

impl ResponseReceiver {
    /// Wait for the response
    ///
    /// Returns `None` only if the call was dropped unresolved, which the
    /// dispatch protocol does not do: every accepted call is resolved by
    /// exactly one of dispatch or cleanup.
    pub async fn recv(self) -> Option<Response> {
        self.rx.await.ok()
    }
}
