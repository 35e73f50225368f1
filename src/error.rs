use crate::descriptor::DescriptorError;
use crate::namespace::NativeError;
use thiserror::Error;

/// Structured error context for configuration and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "WEBEXT_COMPAT_STRICT")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "bridge_config", "descriptor_loader")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the compatibility engine.
///
/// The `Display` text of the first five variants is a compatibility contract:
/// callers pattern-match on it, so it must not gain prefixes or context.
#[derive(Debug, Error)]
pub enum Error {
    /// The capability root is absent from the live namespace.
    #[error("{title} API is not available{}", format_detail(.detail))]
    CapabilityUnavailable {
        title: String,
        detail: Option<String>,
    },

    /// The capability root exists but the member failed support resolution.
    #[error("{title} API doesn't support \"{member}\"{}", format_detail(.detail))]
    MemberUnsupported {
        title: String,
        member: String,
        detail: Option<String>,
    },

    /// The member resolved but is not a function.
    #[error("{title} API member \"{member}\" is not callable")]
    MemberNotCallable { title: String, member: String },

    /// The member resolved but does not expose a listener surface.
    #[error("{title} API member \"{member}\" is not an event")]
    MemberNotEvent { title: String, member: String },

    /// The native call failed, or its completion reported a last error.
    #[error(transparent)]
    Native(#[from] NativeError),

    /// A declarative rule was rejected before reaching the native side.
    #[error("{message}")]
    RuleValidation { message: String },

    #[error("Support descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(" ({})", d),
        None => String::new(),
    }
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn capability_unavailable(title: impl Into<String>, detail: Option<&str>) -> Self {
        Error::CapabilityUnavailable {
            title: title.into(),
            detail: detail.map(str::to_string),
        }
    }

    pub fn member_unsupported(
        title: impl Into<String>,
        member: impl Into<String>,
        detail: Option<&str>,
    ) -> Self {
        Error::MemberUnsupported {
            title: title.into(),
            member: member.into(),
            detail: detail.map(str::to_string),
        }
    }

    pub fn member_not_callable(title: impl Into<String>, member: impl Into<String>) -> Self {
        Error::MemberNotCallable {
            title: title.into(),
            member: member.into(),
        }
    }

    pub fn member_not_event(title: impl Into<String>, member: impl Into<String>) -> Self {
        Error::MemberNotEvent {
            title: title.into(),
            member: member.into(),
        }
    }

    pub fn rule_validation(message: impl Into<String>) -> Self {
        Error::RuleValidation {
            message: message.into(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// True for the availability failures produced before any native code runs.
    pub fn is_support_failure(&self) -> bool {
        matches!(
            self,
            Error::CapabilityUnavailable { .. }
                | Error::MemberUnsupported { .. }
                | Error::MemberNotCallable { .. }
                | Error::MemberNotEvent { .. }
        )
    }
}
