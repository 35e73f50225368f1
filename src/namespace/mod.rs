//! Boundary to the live, host-owned extension API object graph.
//!
//! The engine never builds the graph; it only reads it through [`Namespace`]
//! and invokes what it finds. Hosts that embed a JavaScript engine implement
//! the trait over their own object model; [`StaticNamespace`] is an in-memory
//! graph for native hosts and tests.

mod listeners;
mod memory;

pub use listeners::{EventListeners, Listener, ListenerTarget};
pub use memory::StaticNamespace;

use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Live path of the last-error slot on the message-bus root.
pub const LAST_ERROR_PATH: &str = "runtime.lastError";

/// Message used when a native failure carries no text.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Failure raised by native code, or reported through the last-error slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
pub struct NativeError {
    pub message: Option<String>,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn unknown() -> Self {
        Self { message: None }
    }

    /// Interpret a last-error slot value. `null` means no error.
    pub fn from_last_error(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(message) => Some(Self::new(message.clone())),
            Value::Object(map) => Some(Self {
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            _ => Some(Self::unknown()),
        }
    }
}

/// A live node in the namespace graph.
#[derive(Clone)]
pub enum Member {
    /// Plain property value.
    Value(Value),
    /// Invocable member.
    Function(Arc<dyn NativeFunction>),
    /// Event object exposing the listener operations.
    Event(Arc<dyn ListenerTarget>),
    /// Interior node (a capability root or sub-namespace).
    Object,
}

impl Member {
    /// Wrap a closure as an invocable member.
    pub fn function<F>(func: F) -> Self
    where
        F: Fn(NativeArgs) -> Result<NativeReturn, NativeError> + Send + Sync + 'static,
    {
        Member::Function(Arc::new(FnNative::new(func)))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Member::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<dyn NativeFunction>> {
        match self {
            Member::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&Arc<dyn ListenerTarget>> {
        match self {
            Member::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Member::Function(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Member::Value(_) => "value",
            Member::Function(_) => "function",
            Member::Event(_) => "event",
            Member::Object => "object",
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(v) => f.debug_tuple("Value").field(v).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// Read access to the live graph.
///
/// `get` must reflect the graph at call time; the engine never caches results.
pub trait Namespace: Send + Sync {
    /// Member at a dotted path relative to the namespace root, `None` when undefined.
    fn get(&self, path: &str) -> Option<Member>;

    /// Current value of the last-error slot.
    fn last_error(&self) -> Option<NativeError> {
        match self.get(LAST_ERROR_PATH)? {
            Member::Value(value) => NativeError::from_last_error(&value),
            _ => None,
        }
    }
}

/// One-shot completion callback injected into callback-style natives.
pub struct Completion(Box<dyn FnOnce(Vec<Value>) + Send>);

impl Completion {
    pub fn new<F>(func: F) -> Self
    where
        F: FnOnce(Vec<Value>) + Send + 'static,
    {
        Self(Box::new(func))
    }

    /// Fire the callback with the arguments a native would pass.
    pub fn fire(self, args: Vec<Value>) {
        (self.0)(args)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Completion")
    }
}

/// Arguments handed to a native member.
#[derive(Debug, Default)]
pub struct NativeArgs {
    pub values: Vec<Value>,
    /// Trailing callback, present only for bridged deferred calls.
    pub completion: Option<Completion>,
}

impl NativeArgs {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            completion: None,
        }
    }

    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Fire the completion if one was injected. Returns whether it fired.
    pub fn complete(self, args: Vec<Value>) -> bool {
        match self.completion {
            Some(completion) => {
                completion.fire(args);
                true
            }
            None => false,
        }
    }
}

/// What a native member returns.
pub enum NativeReturn {
    Value(Value),
    /// A natively deferred result (promise-returning runtimes).
    Deferred(BoxFuture<'static, Result<Value, NativeError>>),
}

impl NativeReturn {
    pub fn deferred<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Result<Value, NativeError>> + Send + 'static,
    {
        NativeReturn::Deferred(Box::pin(future))
    }

    /// The direct value, or `None` for a deferred result.
    pub fn into_value(self) -> Option<Value> {
        match self {
            NativeReturn::Value(v) => Some(v),
            NativeReturn::Deferred(_) => None,
        }
    }
}

impl From<Value> for NativeReturn {
    fn from(value: Value) -> Self {
        NativeReturn::Value(value)
    }
}

impl fmt::Debug for NativeReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeReturn::Value(v) => f.debug_tuple("Value").field(v).finish(),
            NativeReturn::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// An invocable member of the live graph.
pub trait NativeFunction: Send + Sync {
    fn invoke(&self, args: NativeArgs) -> Result<NativeReturn, NativeError>;
}

/// Closure adapter for [`NativeFunction`].
pub struct FnNative<F> {
    func: F,
}

impl<F> FnNative<F>
where
    F: Fn(NativeArgs) -> Result<NativeReturn, NativeError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> NativeFunction for FnNative<F>
where
    F: Fn(NativeArgs) -> Result<NativeReturn, NativeError> + Send + Sync,
{
    fn invoke(&self, args: NativeArgs) -> Result<NativeReturn, NativeError> {
        (self.func)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_last_error_shapes() {
        assert_eq!(NativeError::from_last_error(&Value::Null), None);
        assert_eq!(
            NativeError::from_last_error(&json!({"message": "Error"})),
            Some(NativeError::new("Error"))
        );
        assert_eq!(
            NativeError::from_last_error(&json!({})),
            Some(NativeError::unknown())
        );
        assert_eq!(NativeError::unknown().to_string(), "Unknown Error");
    }

    #[test]
    fn test_completion_fires_once_with_args() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let args = NativeArgs::new(vec![json!(1)]).with_completion(Completion::new(move |a| {
            sink.lock().unwrap().extend(a);
        }));
        assert!(args.complete(vec![json!("done")]));
        assert_eq!(*seen.lock().unwrap(), vec![json!("done")]);
        assert!(!NativeArgs::new(vec![]).complete(vec![]));
    }

    #[test]
    fn test_function_member() {
        let member = Member::function(|args| Ok(NativeReturn::Value(json!(args.values.len()))));
        assert!(member.is_callable());
        assert_eq!(member.kind(), "function");
        let out = member
            .as_function()
            .unwrap()
            .invoke(NativeArgs::new(vec![json!(1), json!(2)]))
            .unwrap();
        assert_eq!(out.into_value(), Some(json!(2)));
    }
}
