//! Support resolution.
//!
//! Walks a member path one prefix at a time against the live namespace and
//! the support descriptor, and reports the first segment that cannot be used
//! on the active runtime.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::descriptor::{CompatBlock, SupportDescriptor, VersionAdded};
use crate::runtime::RuntimeIdentity;
use crate::utils::MemberPath;
use crate::version::VersionComparator;

/// Listener operations present on every event object of every runtime.
pub const STANDARD_MEMBERS: &[&str] = &["addListener", "removeListener", "hasListener", "hasListeners"];

/// How a capability surface addresses its members in the live graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressingMode {
    /// The area name is the first live segment ("tabs.query") and must exist.
    #[default]
    Prefixed,
    /// Members hang off the namespace root ("getURL"); the area is assumed
    /// present and only keys descriptor lookups ("runtime.getURL").
    Unprefixed,
}

/// Outcome of resolving one member.
///
/// `path == None` means resolved. Otherwise `path` is the first failing
/// segment and `message` says why (`None`: not defined, no further detail).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: Option<String>,
    pub message: Option<String>,
}

impl Diagnostic {
    pub fn resolved() -> Self {
        Self::default()
    }

    pub fn undefined(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            message: None,
        }
    }

    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            message: Some(message.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.path.is_none()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, &self.message) {
            (None, _) => f.write_str("resolved"),
            (Some(path), Some(message)) => write!(f, "{}: {}", path, message),
            (Some(path), None) => write!(f, "{}: not defined", path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Live,
    Static,
}

/// Classifies members as supported or not for a runtime.
pub struct SupportResolver {
    descriptor: Arc<SupportDescriptor>,
    standard_members: HashSet<String>,
    strict: bool,
}

impl SupportResolver {
    pub fn new(descriptor: Arc<SupportDescriptor>) -> Self {
        Self {
            descriptor,
            standard_members: STANDARD_MEMBERS.iter().map(|s| s.to_string()).collect(),
            strict: false,
        }
    }

    pub fn with_config(mut self, config: &BridgeConfig) -> Self {
        self.strict = config.strict_descriptor;
        self.standard_members
            .extend(config.extra_standard_members.iter().cloned());
        self
    }

    pub fn descriptor(&self) -> &SupportDescriptor {
        &self.descriptor
    }

    pub fn shared_descriptor(&self) -> Arc<SupportDescriptor> {
        self.descriptor.clone()
    }

    pub fn is_standard(&self, name: &str) -> bool {
        self.standard_members.contains(name)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Resolve `member` of capability `area` against the runtime's live graph.
    pub fn resolve(
        &self,
        area: &str,
        member: &str,
        runtime: &RuntimeIdentity,
        mode: AddressingMode,
    ) -> Diagnostic {
        self.walk(area, member, runtime, mode, Presence::Live)
    }

    /// Check `member` against the descriptor alone, treating every segment as present.
    pub fn check_static(&self, area: &str, member: &str, runtime: &RuntimeIdentity) -> Diagnostic {
        self.walk(area, member, runtime, AddressingMode::Unprefixed, Presence::Static)
    }

    fn walk(
        &self,
        area: &str,
        member: &str,
        runtime: &RuntimeIdentity,
        mode: AddressingMode,
        presence: Presence,
    ) -> Diagnostic {
        let member_path = MemberPath::parse(member);
        let namespace = match presence {
            Presence::Live => runtime.namespace(),
            Presence::Static => None,
        };

        // The area is one segment even when its name is dotted ("devtools.panels").
        let (live_path, root_len) = match mode {
            AddressingMode::Prefixed => {
                let root = MemberPath::parse(area);
                let root_name = root.to_string();
                if namespace.and_then(|ns| ns.get(&root_name)).is_none() {
                    return Diagnostic::undefined(root_name);
                }
                (member_path.prefixed(area), root.len())
            }
            AddressingMode::Unprefixed => (member_path, 0),
        };

        for prefix in live_path.prefixes().skip(root_len) {
            let path = prefix.to_string();
            let live = namespace.and_then(|ns| ns.get(&path));

            if prefix.leaf().map(|l| self.is_standard(l)).unwrap_or(false) {
                continue;
            }

            let key = match mode {
                AddressingMode::Prefixed => path.clone(),
                AddressingMode::Unprefixed => format!("{}.{}", area, path),
            };
            let compat = self.descriptor.compat(&key);
            let defined = live.is_some() || presence == Presence::Static;

            if live.is_some() && !self.strict {
                if let Some(block) = compat {
                    Self::log_status(&key, block, runtime);
                }
                continue;
            }

            let Some(block) = compat.filter(|b| b.support.is_some()) else {
                if live.is_some() {
                    warn!(member = %key, "live member is missing from the support descriptor");
                    continue;
                }
                return Diagnostic::failed(path, "unknown member");
            };

            let Some(statement) = block.statement_for(runtime.name()) else {
                if live.is_some() {
                    warn!(
                        member = %key,
                        runtime = runtime.name(),
                        "support descriptor has no entry for this runtime"
                    );
                    continue;
                }
                return Diagnostic::failed(path, format!("unknown runtime: {}", runtime.name()));
            };

            match &statement.version_added {
                Some(VersionAdded::Flag(false)) => {
                    return Diagnostic::failed(path, "not implemented");
                }
                Some(VersionAdded::Version(added))
                    if !VersionComparator::satisfies(runtime.version(), added) =>
                {
                    return Diagnostic::failed(
                        path,
                        format!("requires: {} >= {}", runtime.name(), added),
                    );
                }
                _ => {}
            }

            Self::log_status(&key, block, runtime);

            if !defined {
                return Diagnostic::undefined(path);
            }
        }

        debug!(area, member, runtime = runtime.name(), "member resolved");
        Diagnostic::resolved()
    }

    fn log_status(key: &str, block: &CompatBlock, runtime: &RuntimeIdentity) {
        if block.is_deprecated(runtime.name()) {
            warn!(member = %key, runtime = runtime.name(), "member is deprecated");
        }
        if block.is_experimental(runtime.name()) {
            debug!(member = %key, runtime = runtime.name(), "member is experimental");
        }
    }
}
