//! Runtime identity: which browser the engine is bridging and how it calls back.

use std::fmt;
use std::sync::Arc;

use crate::namespace::Namespace;

/// Identity of the active runtime.
///
/// `name` is the key used in support descriptors ("chrome", "firefox", ...);
/// `title` is the display name used in error messages ("Chrome").
#[derive(Clone)]
pub struct RuntimeIdentity {
    name: String,
    title: String,
    version: String,
    promises_native: bool,
    namespace: Option<Arc<dyn Namespace>>,
}

impl RuntimeIdentity {
    pub fn builder(name: impl Into<String>) -> RuntimeIdentityBuilder {
        RuntimeIdentityBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether natives return deferred results instead of taking a callback.
    pub fn promises_native(&self) -> bool {
        self.promises_native
    }

    /// The live graph, or `None` when the runtime exposes no extension namespace.
    pub fn namespace(&self) -> Option<&Arc<dyn Namespace>> {
        self.namespace.as_ref()
    }

    pub fn with_namespace(mut self, namespace: Arc<dyn Namespace>) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn without_namespace(mut self) -> Self {
        self.namespace = None;
        self
    }
}

impl fmt::Debug for RuntimeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeIdentity")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("version", &self.version)
            .field("promises_native", &self.promises_native)
            .field("namespace", &self.namespace.is_some())
            .finish()
    }
}

/// Builder for [`RuntimeIdentity`].
pub struct RuntimeIdentityBuilder {
    name: String,
    title: Option<String>,
    version: String,
    promises_native: bool,
    namespace: Option<Arc<dyn Namespace>>,
}

impl RuntimeIdentityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            version: "0".to_string(),
            promises_native: false,
            namespace: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn promises_native(mut self, enabled: bool) -> Self {
        self.promises_native = enabled;
        self
    }

    pub fn namespace(mut self, namespace: Arc<dyn Namespace>) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Title defaults to the name with its first letter upper-cased.
    pub fn build(self) -> RuntimeIdentity {
        let title = self.title.unwrap_or_else(|| {
            let mut chars = self.name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        });
        RuntimeIdentity {
            name: self.name,
            title,
            version: self.version,
            promises_native: self.promises_native,
            namespace: self.namespace,
        }
    }
}
