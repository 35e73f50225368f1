//! Event listener registry.

use serde_json::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// A listener callback. Two listeners are equal when they share the same closure.
#[derive(Clone)]
pub struct Listener {
    func: Arc<dyn Fn(&[Value]) + Send + Sync>,
}

impl Listener {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    pub fn call(&self, args: &[Value]) {
        (self.func)(args)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.func) as *const ()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", self.addr())
    }
}

/// The listener operations every runtime exposes on an event object.
pub trait ListenerTarget: Send + Sync {
    fn add_listener(&self, listener: Listener);
    fn remove_listener(&self, listener: &Listener);
    fn has_listener(&self, listener: &Listener) -> bool;
    fn has_listeners(&self) -> bool;
}

/// Ordered listener list with dispatch. Adding a registered listener again is a no-op.
#[derive(Default)]
pub struct EventListeners {
    listeners: RwLock<Vec<Listener>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call every listener in registration order; returns how many ran.
    pub fn dispatch(&self, args: &[Value]) -> usize {
        let snapshot: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &snapshot {
            listener.call(args);
        }
        snapshot.len()
    }

    pub fn count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ListenerTarget for EventListeners {
    fn add_listener(&self, listener: Listener) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    fn remove_listener(&self, listener: &Listener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|l| l != listener);
    }

    fn has_listener(&self, listener: &Listener) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(listener)
    }

    fn has_listeners(&self) -> bool {
        self.count() > 0
    }
}
