//! Descriptor error types

/// Errors raised while loading or validating a support descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Failed to load support descriptor from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Failed to parse support descriptor: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    ParseError {
        reason: String,
        hint: Option<String>,
    },

    #[error("Support descriptor failed schema validation:\n  - {}{}", .errors.join("\n  - "), .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    SchemaError {
        errors: Vec<String>,
        hint: Option<String>,
    },

    #[error("Invalid compat entry at {path}: {reason}")]
    InvalidEntry { path: String, reason: String },

    #[error("Support descriptor not found: {name}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    NotFound { name: String, hint: Option<String> },

    #[error("Internal descriptor error: {0}")]
    Internal(String),
}

impl DescriptorError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            DescriptorError::LoadError { ref mut hint, .. } => *hint = hint_val,
            DescriptorError::ParseError { ref mut hint, .. } => *hint = hint_val,
            DescriptorError::SchemaError { ref mut hint, .. } => *hint = hint_val,
            DescriptorError::NotFound { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }
}
