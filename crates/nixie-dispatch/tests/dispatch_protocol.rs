//! End-to-end protocol test: a serialized scheduler loop driving a target
//! through the sync, async, fatal, and cleanup paths, with callers blocked on
//! their response channels.

use async_trait::async_trait;
use nixie_core::{
    response_channel, AsyncCall, Call, Continuation, Error, MethodName, ResponseReceiver,
    Result, SyncCall, TaskToken, Target, Value,
};
use nixie_dispatch::Dispatcher;
use serde_json::json;
use tokio::sync::mpsc;

/// Counter actor: one mutable cell, arithmetic on it
struct Counter {
    count: i64,
}

#[async_trait]
impl Target for Counter {
    async fn invoke(
        &mut self,
        method: &MethodName,
        arguments: &[Value],
        _continuation: Option<&Continuation>,
    ) -> Result<Value> {
        match method.as_str() {
            "increment" => {
                self.count += 1;
                Ok(json!(self.count))
            }
            "add" => {
                if arguments.len() != 1 {
                    return Err(Error::invalid_arguments(
                        method.as_str(),
                        format!("expected 1 argument, got {}", arguments.len()),
                    ));
                }
                let delta = arguments[0]
                    .as_i64()
                    .ok_or_else(|| Error::invalid_arguments(method.as_str(), "not an integer"))?;
                self.count += delta;
                Ok(json!(self.count))
            }
            "get" => Ok(json!(self.count)),
            "corrupt" => Err(Error::app("state corrupted")),
            _ => Err(Error::method_not_found(method.as_str())),
        }
    }
}

/// One queued request, as the external mailbox would hold it
enum Request {
    Sync(SyncCall),
    Async(AsyncCall),
}

/// Minimal run loop: serializes dispatches against one target and switches to
/// the cleanup path once a fatal failure has torn the callee down.
async fn run_actor(mut inbox: mpsc::Receiver<Request>, mut target: Counter) {
    let dispatcher = Dispatcher::new();
    let mut alive = true;

    while let Some(request) = inbox.recv().await {
        match request {
            Request::Sync(call) if alive => {
                alive = dispatcher.dispatch_sync(call, &mut target).await.is_ok();
            }
            Request::Sync(call) => dispatcher.cleanup(call),
            Request::Async(call) if alive => {
                alive = dispatcher.dispatch_async(call, &mut target).await.is_ok();
            }
            Request::Async(_) => {}
        }
    }
}

fn sync_request(method: &str, arguments: Vec<Value>, task: u64) -> (Request, ResponseReceiver) {
    let (sender, receiver) = response_channel();
    let call = Call::new(MethodName::new(method).unwrap(), arguments).unwrap();
    (
        Request::Sync(SyncCall::new(call, sender, TaskToken::new(task))),
        receiver,
    )
}

fn async_request(method: &str, arguments: Vec<Value>) -> Request {
    let call = Call::new(MethodName::new(method).unwrap(), arguments).unwrap();
    Request::Async(AsyncCall::new(call))
}

#[tokio::test]
async fn test_round_trip_unblocks_waiting_caller() {
    let (tx, rx) = mpsc::channel(16);
    let actor = tokio::spawn(run_actor(rx, Counter { count: 0 }));

    let (request, receiver) = sync_request("add", vec![json!(5)], 1);
    tx.send(request).await.unwrap();

    // A separate task blocked on the channel; delivery is what unblocks it.
    let caller = tokio::spawn(async move { receiver.recv().await });
    let response = caller.await.unwrap().unwrap();
    assert_eq!(response.into_result().unwrap(), json!(5));

    drop(tx);
    actor.await.unwrap();
}

#[tokio::test]
async fn test_callee_survives_bad_requests() {
    let (tx, rx) = mpsc::channel(16);
    let actor = tokio::spawn(run_actor(rx, Counter { count: 0 }));

    // A missing method and a wrong arity, then a healthy call: the protocol
    // aborts must leave the callee usable.
    let (bad_method, bad_method_rx) = sync_request("nope", vec![], 1);
    let (bad_arity, bad_arity_rx) = sync_request("add", vec![], 2);
    let (healthy, healthy_rx) = sync_request("increment", vec![], 3);

    tx.send(bad_method).await.unwrap();
    tx.send(bad_arity).await.unwrap();
    tx.send(healthy).await.unwrap();

    let failure = bad_method_rx.recv().await.unwrap().into_result().unwrap_err();
    assert!(failure.is_caller_protocol());
    assert!(matches!(failure.cause(), Error::MethodNotFound { .. }));

    let failure = bad_arity_rx.recv().await.unwrap().into_result().unwrap_err();
    assert!(failure.is_caller_protocol());
    assert!(matches!(failure.cause(), Error::InvalidArguments { .. }));

    let response = healthy_rx.recv().await.unwrap();
    assert_eq!(response.into_result().unwrap(), json!(1));

    drop(tx);
    actor.await.unwrap();
}

#[tokio::test]
async fn test_fatal_failure_answers_then_tears_down() {
    let (tx, rx) = mpsc::channel(16);
    let actor = tokio::spawn(run_actor(rx, Counter { count: 0 }));

    let (fatal, fatal_rx) = sync_request("corrupt", vec![], 1);
    let (after, after_rx) = sync_request("get", vec![], 2);

    tx.send(fatal).await.unwrap();
    tx.send(after).await.unwrap();

    // The fatal call's caller still gets its response, sent before teardown.
    let failure = fatal_rx.recv().await.unwrap().into_result().unwrap_err();
    assert_eq!(failure, Error::app("state corrupted"));

    // Calls queued behind the teardown are resolved by cleanup.
    let failure = after_rx.recv().await.unwrap().into_result().unwrap_err();
    assert_eq!(failure, Error::TargetTerminated);

    drop(tx);
    actor.await.unwrap();
}

#[tokio::test]
async fn test_async_caller_mistake_does_not_kill_callee() {
    let (tx, rx) = mpsc::channel(16);
    let actor = tokio::spawn(run_actor(rx, Counter { count: 0 }));

    tx.send(async_request("nope", vec![])).await.unwrap();
    tx.send(async_request("increment", vec![])).await.unwrap();

    let (probe, probe_rx) = sync_request("get", vec![], 1);
    tx.send(probe).await.unwrap();

    // The swallowed abort left the callee running; the later async increment
    // was executed.
    let response = probe_rx.recv().await.unwrap();
    assert_eq!(response.into_result().unwrap(), json!(1));

    drop(tx);
    actor.await.unwrap();
}

#[tokio::test]
async fn test_gone_caller_does_not_disturb_the_loop() {
    let (tx, rx) = mpsc::channel(16);
    let actor = tokio::spawn(run_actor(rx, Counter { count: 0 }));

    let (request, receiver) = sync_request("increment", vec![], 1);
    drop(receiver); // caller exits before the response can be delivered
    tx.send(request).await.unwrap();

    let (probe, probe_rx) = sync_request("get", vec![], 2);
    tx.send(probe).await.unwrap();

    let response = probe_rx.recv().await.unwrap();
    assert_eq!(response.into_result().unwrap(), json!(1));

    drop(tx);
    actor.await.unwrap();
}
