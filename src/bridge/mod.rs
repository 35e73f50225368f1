//! Invocation bridge: the single call surface over one capability area.
//!
//! Every operation first resolves the member (see [`crate::resolver`]), then
//! reads or invokes it on the live graph. Failures are classified into the
//! byte-exact messages callers pattern-match on:
//!
//! - `"{Title} API is not available"` when the capability root is missing
//! - `"{Title} API doesn't support \"{name}\""` when the member fails resolution
//!
//! both optionally suffixed with `" ({diagnostic message})"`.

mod deferred;

use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::descriptor::SupportDescriptor;
use crate::namespace::{Member, NativeArgs, NativeReturn};
use crate::resolver::{AddressingMode, Diagnostic, SupportResolver};
use crate::runtime::RuntimeIdentity;
use crate::utils::MemberPath;
use crate::{Error, Result};

/// Result of [`InvocationBridge::deferred_call`]: resolves or rejects exactly once.
pub type Deferred<T = Value> = BoxFuture<'static, Result<T>>;

/// Whether a member can be used right now.
#[derive(Debug, Clone)]
pub enum Availability {
    /// Resolved, with the live member as read at resolution time.
    Ready(Member),
    /// The capability root is absent from the live graph.
    RootMissing(Diagnostic),
    /// The root exists but the member failed resolution.
    Unsupported(Diagnostic),
}

impl Availability {
    /// The classified error for a failed availability, `None` when ready.
    pub fn error(&self, title: &str, name: &str) -> Option<Error> {
        match self {
            Availability::Ready(_) => None,
            Availability::RootMissing(diag) => {
                Some(Error::capability_unavailable(title, diag.message()))
            }
            Availability::Unsupported(diag) => {
                Some(Error::member_unsupported(title, name, diag.message()))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready(_))
    }
}

/// Call surface for one capability area on one runtime.
pub struct InvocationBridge {
    area: String,
    mode: AddressingMode,
    runtime: RuntimeIdentity,
    resolver: Arc<SupportResolver>,
}

impl InvocationBridge {
    pub fn new(
        area: impl Into<String>,
        descriptor: Arc<SupportDescriptor>,
        runtime: RuntimeIdentity,
    ) -> Self {
        Self {
            area: area.into(),
            mode: AddressingMode::default(),
            runtime,
            resolver: Arc::new(SupportResolver::new(descriptor)),
        }
    }

    /// Build a bridge that shares an existing resolver (and its configuration).
    pub fn with_resolver(
        area: impl Into<String>,
        resolver: Arc<SupportResolver>,
        runtime: RuntimeIdentity,
    ) -> Self {
        Self {
            area: area.into(),
            mode: AddressingMode::default(),
            runtime,
            resolver,
        }
    }

    pub fn with_mode(mut self, mode: AddressingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_config(mut self, config: &BridgeConfig) -> Self {
        let descriptor = self.resolver.shared_descriptor();
        self.resolver = Arc::new(SupportResolver::new(descriptor).with_config(config));
        self
    }

    /// Replace the runtime for this instance only.
    pub fn with_runtime(mut self, runtime: RuntimeIdentity) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn runtime(&self) -> &RuntimeIdentity {
        &self.runtime
    }

    pub fn resolver(&self) -> &Arc<SupportResolver> {
        &self.resolver
    }

    pub fn diagnose(&self, name: &str) -> Diagnostic {
        self.resolver
            .resolve(&self.area, name, &self.runtime, self.mode)
    }

    /// Whether the capability root is present in the live graph right now.
    pub fn is_root_available(&self) -> bool {
        match (self.runtime.namespace(), self.mode) {
            (None, _) => false,
            (Some(ns), AddressingMode::Prefixed) => ns.get(&self.area).is_some(),
            (Some(_), AddressingMode::Unprefixed) => true,
        }
    }

    pub fn availability(&self, name: &str) -> Availability {
        let diagnostic = self.diagnose(name);
        if !self.is_root_available() {
            return Availability::RootMissing(diagnostic);
        }
        if !diagnostic.is_resolved() {
            return Availability::Unsupported(diagnostic);
        }

        let path = self.live_path(name);
        match self.runtime.namespace().and_then(|ns| ns.get(&path)) {
            Some(member) => Availability::Ready(member),
            None => Availability::Unsupported(Diagnostic::undefined(path)),
        }
    }

    /// Current live value of `name`. Never cached.
    pub fn read_property(&self, name: &str) -> Result<Member> {
        self.resolve_member(name)
    }

    /// Invoke `name` synchronously and return what the native returned.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<NativeReturn> {
        self.invoke(name, NativeArgs::new(args))
    }

    /// Invoke `name` and expose the outcome as a deferred result, whichever
    /// convention the runtime's natives use.
    ///
    /// Support checks and the native invocation happen before this returns;
    /// only the outcome is deferred.
    pub fn deferred_call(&self, name: &str, args: Vec<Value>) -> Deferred {
        if self.runtime.promises_native() {
            deferred::from_native(self.call(name, args))
        } else {
            deferred::via_callback(self, name, args)
        }
    }

    pub(crate) fn invoke(&self, name: &str, args: NativeArgs) -> Result<NativeReturn> {
        match self.resolve_member(name)? {
            Member::Function(func) => func.invoke(args).map_err(Error::from),
            _ => Err(Error::member_not_callable(self.runtime.title(), name)),
        }
    }

    fn resolve_member(&self, name: &str) -> Result<Member> {
        match self.availability(name) {
            Availability::Ready(member) => Ok(member),
            other => Err(other
                .error(self.runtime.title(), name)
                .unwrap_or_else(|| Error::member_unsupported(self.runtime.title(), name, None))),
        }
    }

    fn live_path(&self, name: &str) -> String {
        let member = MemberPath::parse(name);
        match self.mode {
            AddressingMode::Prefixed => member.prefixed(&self.area).to_string(),
            AddressingMode::Unprefixed => member.to_string(),
        }
    }
}
