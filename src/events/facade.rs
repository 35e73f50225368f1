//! Named-event wrappers for capability surfaces.

use futures::future::{self, FutureExt};
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

use super::listener_proxy::ListenerProxy;
use super::rules::{Rule, RuleValidator};
use crate::bridge::{Deferred, InvocationBridge};
use crate::namespace::Listener;
use crate::resolver::Diagnostic;
use crate::Result;

/// A fixed, named event of one capability area.
pub struct EventFacade {
    name: String,
    proxy: ListenerProxy,
}

impl EventFacade {
    pub fn new(bridge: &InvocationBridge, name: impl Into<String>) -> Self {
        let name = name.into();
        let proxy = ListenerProxy::new(bridge, name.clone());
        Self { name, proxy }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_supported(&self) -> bool {
        self.proxy.is_supported()
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.proxy.diagnostic()
    }

    pub fn add_listener(&self, listener: Listener) -> Result<()> {
        self.proxy.add_listener(listener)
    }

    pub fn remove_listener(&self, listener: &Listener) -> Result<()> {
        self.proxy.remove_listener(listener)
    }

    pub fn has_listener(&self, listener: &Listener) -> Result<bool> {
        self.proxy.has_listener(listener)
    }

    pub fn has_listeners(&self) -> Result<bool> {
        self.proxy.has_listeners()
    }
}

/// An event whose host registry also manages declarative rules.
///
/// `addRules`, `getRules` and `removeRules` are members of the live event
/// object and go through [`InvocationBridge::deferred_call`]. An optional
/// [`RuleValidator`] vets rules before any native call is attempted.
pub struct DeclarativeEventFacade {
    event: EventFacade,
    bridge: Arc<InvocationBridge>,
    validator: Option<Arc<dyn RuleValidator>>,
}

impl DeclarativeEventFacade {
    pub fn new(bridge: Arc<InvocationBridge>, name: impl Into<String>) -> Self {
        Self {
            event: EventFacade::new(&bridge, name),
            bridge,
            validator: None,
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn RuleValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Register `rules`; resolves with the rules as the host stored them.
    pub fn add_rules(&self, rules: Vec<Rule>) -> Deferred<Vec<Rule>> {
        let payload = match self.encode(rules) {
            Ok(payload) => payload,
            Err(e) => return future::ready(Err(e)).boxed(),
        };
        self.bridge
            .deferred_call(&self.member("addRules"), vec![Value::Array(payload)])
            .map(|outcome| outcome.and_then(decode_rules))
            .boxed()
    }

    /// Registered rules, optionally restricted to `ids`.
    pub fn get_rules(&self, ids: Option<Vec<String>>) -> Deferred<Vec<Rule>> {
        self.bridge
            .deferred_call(&self.member("getRules"), id_args(ids))
            .map(|outcome| outcome.and_then(decode_rules))
            .boxed()
    }

    /// Unregister rules by id, or all rules when `ids` is `None`.
    pub fn remove_rules(&self, ids: Option<Vec<String>>) -> Deferred<()> {
        self.bridge
            .deferred_call(&self.member("removeRules"), id_args(ids))
            .map(|outcome| outcome.map(|_| ()))
            .boxed()
    }

    fn encode(&self, rules: Vec<Rule>) -> Result<Vec<Value>> {
        match &self.validator {
            Some(validator) => validator.validate(rules),
            None => rules
                .iter()
                .map(|rule| Ok(serde_json::to_value(rule)?))
                .collect(),
        }
    }

    fn member(&self, operation: &str) -> String {
        format!("{}.{}", self.event.name(), operation)
    }
}

impl Deref for DeclarativeEventFacade {
    type Target = EventFacade;

    fn deref(&self) -> &EventFacade {
        &self.event
    }
}

fn id_args(ids: Option<Vec<String>>) -> Vec<Value> {
    ids.map(|ids| vec![Value::from(ids)]).unwrap_or_default()
}

fn decode_rules(value: Value) -> Result<Vec<Rule>> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SupportDescriptor;
    use crate::namespace::{EventListeners, StaticNamespace};
    use crate::runtime::RuntimeIdentity;
    use serde_json::json;

    fn bridge(ns: &StaticNamespace) -> Arc<InvocationBridge> {
        let runtime = RuntimeIdentity::builder("firefox")
            .version("115")
            .promises_native(true)
            .namespace(ns.clone().into_arc())
            .build();
        Arc::new(InvocationBridge::new(
            "declarativeContent",
            Arc::new(SupportDescriptor::empty()),
            runtime,
        ))
    }

    #[test]
    fn test_event_facade_delegates() {
        let ns = StaticNamespace::new();
        ns.insert_event("declarativeContent.onPageChanged", Arc::new(EventListeners::new()));
        let facade = EventFacade::new(&bridge(&ns), "onPageChanged");
        assert_eq!(facade.name(), "onPageChanged");
        assert!(facade.is_supported());
        assert!(facade.diagnostic().is_none());
        assert!(!facade.has_listeners().unwrap());
    }

    #[tokio::test]
    async fn test_add_rules_without_validator() {
        let ns = StaticNamespace::new();
        ns.insert_event("declarativeContent.onPageChanged", Arc::new(EventListeners::new()))
            .insert_function("declarativeContent.onPageChanged.addRules", |args| {
                Ok(args.values.into_iter().next().unwrap_or(Value::Null).into())
            });
        let facade = DeclarativeEventFacade::new(bridge(&ns), "onPageChanged");

        let stored = facade
            .add_rules(vec![Rule::new().with_id("a")])
            .await
            .unwrap();
        assert_eq!(stored, vec![Rule::new().with_id("a")]);
        assert!(facade.is_supported());
    }

    #[tokio::test]
    async fn test_remove_rules_passes_ids() {
        let ns = StaticNamespace::new();
        ns.insert_function("declarativeContent.onPageChanged.removeRules", |args| {
            assert_eq!(args.values, vec![json!(["a", "b"])]);
            Ok(Value::Null.into())
        });
        let facade = DeclarativeEventFacade::new(bridge(&ns), "onPageChanged");
        facade
            .remove_rules(Some(vec!["a".into(), "b".into()]))
            .await
            .unwrap();
    }

    #[test]
    fn test_decode_rules() {
        assert!(decode_rules(Value::Null).unwrap().is_empty());
        assert!(decode_rules(json!("nope")).is_err());
        assert_eq!(id_args(None), Vec::<Value>::new());
    }
}
