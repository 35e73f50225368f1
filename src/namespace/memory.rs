//! In-memory namespace graph.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{
    ListenerTarget, Member, NativeArgs, NativeError, NativeReturn, Namespace, LAST_ERROR_PATH,
};
use crate::utils::MemberPath;

/// Namespace graph stored as a flat map of dotted paths.
///
/// Interior nodes exist implicitly: inserting "tabs.query" makes "tabs" resolve
/// to [`Member::Object`]. Clones share the same graph, so a native closure can
/// hold a clone and mutate the graph (for example the last-error slot) while
/// the engine reads it.
#[derive(Clone, Default)]
pub struct StaticNamespace {
    members: Arc<RwLock<BTreeMap<String, Member>>>,
}

impl StaticNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, member: Member) -> &Self {
        let key = MemberPath::parse(path).to_string();
        self.members
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, member);
        self
    }

    pub fn insert_value(&self, path: &str, value: Value) -> &Self {
        self.insert(path, Member::Value(value))
    }

    pub fn insert_function<F>(&self, path: &str, func: F) -> &Self
    where
        F: Fn(NativeArgs) -> Result<NativeReturn, NativeError> + Send + Sync + 'static,
    {
        self.insert(path, Member::function(func))
    }

    pub fn insert_event(&self, path: &str, target: Arc<dyn ListenerTarget>) -> &Self {
        self.insert(path, Member::Event(target))
    }

    /// Mark an empty interior node, e.g. a capability root with no members yet.
    pub fn insert_object(&self, path: &str) -> &Self {
        self.insert(path, Member::Object)
    }

    /// Remove `path` and everything below it. Returns whether anything was removed.
    pub fn remove(&self, path: &str) -> bool {
        let target = MemberPath::parse(path);
        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);
        let before = members.len();
        members.retain(|key, _| {
            let key = MemberPath::parse(key);
            key != target && !key.is_descendant_of(&target)
        });
        members.len() < before
    }

    pub fn set_last_error(&self, value: Value) {
        self.insert_value(LAST_ERROR_PATH, value);
    }

    pub fn clear_last_error(&self) {
        self.members
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(LAST_ERROR_PATH);
    }

    pub fn into_arc(self) -> Arc<dyn Namespace> {
        Arc::new(self)
    }
}

impl Namespace for StaticNamespace {
    fn get(&self, path: &str) -> Option<Member> {
        let key = MemberPath::parse(path).to_string();
        if key.is_empty() {
            return None;
        }

        let members = self.members.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(member) = members.get(&key) {
            return Some(member.clone());
        }

        let child_prefix = format!("{}.", key);
        members
            .range(child_prefix.clone()..)
            .next()
            .filter(|(k, _)| k.starts_with(&child_prefix))
            .map(|_| Member::Object)
    }
}
