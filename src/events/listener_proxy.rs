//! Listener operations over a resolved event member.

use std::sync::Arc;

use crate::bridge::{Availability, InvocationBridge};
use crate::namespace::{Listener, ListenerTarget, Member};
use crate::resolver::Diagnostic;
use crate::{Error, Result};

/// Delegates the four listener operations to a live event object.
///
/// The event member is resolved once, when the proxy is built; the listener
/// operations themselves are standard members and are never looked up in
/// the descriptor.
pub struct ListenerProxy {
    title: String,
    event: String,
    availability: Availability,
}

impl ListenerProxy {
    pub fn new(bridge: &InvocationBridge, event: impl Into<String>) -> Self {
        let event = event.into();
        let availability = bridge.availability(&event);
        Self {
            title: bridge.runtime().title().to_string(),
            event,
            availability,
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// Whether the event resolved to a live event object.
    pub fn is_supported(&self) -> bool {
        matches!(self.availability, Availability::Ready(Member::Event(_)))
    }

    /// The failure diagnostic, `None` when the event resolved.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match &self.availability {
            Availability::Ready(_) => None,
            Availability::RootMissing(diag) | Availability::Unsupported(diag) => Some(diag),
        }
    }

    pub fn add_listener(&self, listener: Listener) -> Result<()> {
        self.target()?.add_listener(listener);
        Ok(())
    }

    pub fn remove_listener(&self, listener: &Listener) -> Result<()> {
        self.target()?.remove_listener(listener);
        Ok(())
    }

    pub fn has_listener(&self, listener: &Listener) -> Result<bool> {
        Ok(self.target()?.has_listener(listener))
    }

    pub fn has_listeners(&self) -> Result<bool> {
        Ok(self.target()?.has_listeners())
    }

    fn target(&self) -> Result<&Arc<dyn ListenerTarget>> {
        match &self.availability {
            Availability::Ready(Member::Event(target)) => Ok(target),
            Availability::Ready(_) => Err(Error::member_not_event(&self.title, &self.event)),
            other => Err(other
                .error(&self.title, &self.event)
                .unwrap_or_else(|| Error::member_unsupported(&self.title, &self.event, None))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SupportDescriptor;
    use crate::namespace::{EventListeners, StaticNamespace};
    use crate::runtime::RuntimeIdentity;
    use serde_json::json;

    fn bridge(ns: &StaticNamespace) -> InvocationBridge {
        let runtime = RuntimeIdentity::builder("firefox")
            .version("115")
            .namespace(ns.clone().into_arc())
            .build();
        InvocationBridge::new("alarms", Arc::new(SupportDescriptor::empty()), runtime)
    }

    #[test]
    fn test_missing_root() {
        let ns = StaticNamespace::new();
        let proxy = ListenerProxy::new(&bridge(&ns), "onAlarm");
        assert!(!proxy.is_supported());
        let err = proxy.has_listeners().unwrap_err();
        assert_eq!(err.to_string(), "Firefox API is not available");
        assert_eq!(proxy.diagnostic(), Some(&Diagnostic::undefined("alarms")));
    }

    #[test]
    fn test_missing_event() {
        let ns = StaticNamespace::new();
        ns.insert_object("alarms");
        let proxy = ListenerProxy::new(&bridge(&ns), "onAlarm");
        let err = proxy.add_listener(Listener::new(|_| {})).unwrap_err();
        assert_eq!(err.to_string(), "Firefox API doesn't support \"onAlarm\" (unknown member)");
    }

    #[test]
    fn test_non_event_member() {
        let ns = StaticNamespace::new();
        ns.insert_value("alarms.onAlarm", json!(true));
        let proxy = ListenerProxy::new(&bridge(&ns), "onAlarm");
        let err = proxy.has_listeners().unwrap_err();
        assert_eq!(err.to_string(), "Firefox API member \"onAlarm\" is not an event");
        assert!(matches!(err, Error::MemberNotEvent { .. }));
    }

    #[test]
    fn test_delegates_to_live_event() {
        let ns = StaticNamespace::new();
        let live = Arc::new(EventListeners::new());
        ns.insert_event("alarms.onAlarm", live.clone());
        let proxy = ListenerProxy::new(&bridge(&ns), "onAlarm");
        assert!(proxy.is_supported());

        let listener = Listener::new(|_| {});
        proxy.add_listener(listener.clone()).unwrap();
        assert_eq!(live.count(), 1);
        assert!(proxy.has_listeners().unwrap());
        proxy.remove_listener(&listener).unwrap();
        assert!(!proxy.has_listener(&listener).unwrap());
    }
}
