//! Bridge configuration.

use crate::{Error, ErrorContext, Result};

/// Environment variable enabling strict-descriptor resolution.
pub const STRICT_ENV: &str = "WEBEXT_COMPAT_STRICT";

/// Options shared by the resolver and the bridges built on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Consult the descriptor even for members that are live.
    ///
    /// Off by default: a defined live member is treated as supported
    /// whatever the descriptor says.
    pub strict_descriptor: bool,
    /// Member names exempt from descriptor lookup, on top of the listener operations.
    pub extra_standard_members: Vec<String>,
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_descriptor(mut self, strict: bool) -> Self {
        self.strict_descriptor = strict;
        self
    }

    pub fn with_standard_member(mut self, name: impl Into<String>) -> Self {
        self.extra_standard_members.push(name.into());
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(STRICT_ENV) {
            config.strict_descriptor = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(Error::configuration_with_context(
                        "expected a boolean",
                        ErrorContext::new()
                            .with_field_path(STRICT_ENV)
                            .with_details(format!("got '{}'", other))
                            .with_source("bridge_config"),
                    ))
                }
            };
        }
        Ok(config)
    }
}
