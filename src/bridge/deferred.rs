//! The two deferred-call strategies.
//!
//! Promise-native runtimes hand back a deferred result directly. Callback
//! runtimes get a completion callback appended to the call; when it fires,
//! the last-error slot is read synchronously, before anything else can run,
//! and decides between rejection and resolution.

use futures::channel::oneshot;
use futures::future::{self, FutureExt, TryFutureExt};
use serde_json::Value;
use tracing::debug;

use super::{Deferred, InvocationBridge};
use crate::namespace::{Completion, NativeArgs, NativeError, NativeReturn};
use crate::{Error, Result};

pub(super) fn from_native(outcome: Result<NativeReturn>) -> Deferred {
    match outcome {
        Ok(NativeReturn::Value(value)) => future::ready(Ok(value)).boxed(),
        Ok(NativeReturn::Deferred(pending)) => pending.map_err(Error::from).boxed(),
        Err(e) => future::ready(Err(e)).boxed(),
    }
}

pub(super) fn via_callback(bridge: &InvocationBridge, name: &str, args: Vec<Value>) -> Deferred {
    let (tx, rx) = oneshot::channel::<std::result::Result<Value, NativeError>>();
    let namespace = bridge.runtime().namespace().cloned();

    let completion = Completion::new(move |values| {
        let outcome = match namespace.as_ref().and_then(|ns| ns.last_error()) {
            Some(err) => Err(err),
            None => Ok(collapse(values)),
        };
        let _ = tx.send(outcome);
    });

    if let Err(e) = bridge.invoke(name, NativeArgs::new(args).with_completion(completion)) {
        return future::ready(Err(e)).boxed();
    }

    let member = name.to_string();
    async move {
        match rx.await {
            Ok(outcome) => outcome.map_err(Error::from),
            Err(_) => {
                // No timeout at this layer: a dropped callback never settles.
                debug!(member = %member, "completion callback dropped without firing");
                future::pending().await
            }
        }
    }
    .boxed()
}

/// Callback arguments as one value: none -> null, one -> itself, more -> array.
fn collapse(mut values: Vec<Value>) -> Value {
    match values.len() {
        0 => Value::Null,
        1 => values.pop().unwrap_or(Value::Null),
        _ => Value::Array(values),
    }
}
