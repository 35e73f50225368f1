//! Support descriptor structure
//!
//! The descriptor is the read-only document that records, per capability area
//! and member, which runtimes implement it and from which version:
//!
//! ```json
//! { "tabs": { "query": { "__compat": { "support": {
//!     "chrome":  { "version_added": "20" },
//!     "firefox": { "version_added": "45", "deprecated": false }
//! } } } } }
//! ```
//!
//! Documents in the browser-compat-data layout (`webextensions.api.<area>`)
//! are unwrapped automatically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::error::DescriptorError;

/// Key under which each node stores its compatibility block.
pub const COMPAT_KEY: &str = "__compat";

/// `version_added` value: a flag or the first version that ships the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionAdded {
    Flag(bool),
    Version(String),
}

/// Support record for one runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportStatement {
    /// `None` when the document records `null` or omits the field.
    #[serde(default)]
    pub version_added: Option<VersionAdded>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub experimental: bool,
}

/// A runtime's support: one statement, or a history whose first entry is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportEntry {
    Single(SupportStatement),
    History(Vec<SupportStatement>),
}

impl SupportEntry {
    pub fn current(&self) -> Option<&SupportStatement> {
        match self {
            SupportEntry::Single(statement) => Some(statement),
            SupportEntry::History(history) => history.first(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatStatus {
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub experimental: bool,
}

/// Contents of one `__compat` node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatBlock {
    #[serde(default)]
    pub support: Option<HashMap<String, SupportEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CompatStatus>,
}

impl CompatBlock {
    pub fn statement_for(&self, runtime: &str) -> Option<&SupportStatement> {
        self.support.as_ref()?.get(runtime)?.current()
    }

    pub fn is_deprecated(&self, runtime: &str) -> bool {
        self.status.as_ref().map(|s| s.deprecated).unwrap_or(false)
            || self
                .statement_for(runtime)
                .map(|s| s.deprecated)
                .unwrap_or(false)
    }

    pub fn is_experimental(&self, runtime: &str) -> bool {
        self.status.as_ref().map(|s| s.experimental).unwrap_or(false)
            || self
                .statement_for(runtime)
                .map(|s| s.experimental)
                .unwrap_or(false)
    }
}

/// Immutable support descriptor, flattened to dotted member paths.
#[derive(Debug, Clone, Default)]
pub struct SupportDescriptor {
    entries: BTreeMap<String, CompatBlock>,
    areas: BTreeSet<String>,
}

impl SupportDescriptor {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_value(document: Value) -> Result<Self, DescriptorError> {
        let root = Self::unwrap_bcd(document);
        let map = match root {
            Value::Object(map) => map,
            other => {
                return Err(DescriptorError::ParseError {
                    reason: format!("expected an object at the top level, found {}", kind(&other)),
                    hint: Some(
                        "A descriptor maps capability areas to members, e.g. {\"tabs\": {...}}"
                            .to_string(),
                    ),
                })
            }
        };

        let mut descriptor = Self::default();
        for (area, node) in &map {
            if area.starts_with('$') || area == COMPAT_KEY {
                continue;
            }
            descriptor.areas.insert(area.clone());
            descriptor.flatten(area, node)?;
        }
        Ok(descriptor)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DescriptorError> {
        let value: Value = serde_json::from_str(content).map_err(|e| DescriptorError::ParseError {
            reason: format!("invalid JSON: {}", e),
            hint: None,
        })?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, DescriptorError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| DescriptorError::ParseError {
            reason: format!("invalid YAML: {}", e),
            hint: Some("Check indentation and quoting of version strings.".to_string()),
        })?;
        Self::from_value(value)
    }

    /// Compatibility block recorded at `path` ("tabs.query"), if any.
    pub fn compat(&self, path: &str) -> Option<&CompatBlock> {
        self.entries.get(path)
    }

    /// Capability areas named at the top level of the document.
    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(String::as_str)
    }

    /// Every member path that carries a compatibility block.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn unwrap_bcd(document: Value) -> Value {
        let is_bcd = document
            .get("webextensions")
            .and_then(|w| w.get("api"))
            .map(Value::is_object)
            .unwrap_or(false);
        if !is_bcd {
            return document;
        }
        match document {
            Value::Object(mut map) => {
                let mut webextensions = map.remove("webextensions").unwrap_or(Value::Null);
                let api = webextensions.get_mut("api").map(Value::take);
                api.unwrap_or(Value::Null)
            }
            other => other,
        }
    }

    fn flatten(&mut self, path: &str, node: &Value) -> Result<(), DescriptorError> {
        let Value::Object(map) = node else {
            return Ok(());
        };

        for (key, child) in map {
            if key == COMPAT_KEY {
                let block: CompatBlock = serde_json::from_value(child.clone()).map_err(|e| {
                    DescriptorError::InvalidEntry {
                        path: path.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                self.entries.insert(path.to_string(), block);
            } else if !key.starts_with('$') {
                self.flatten(&format!("{}.{}", path, key), child)?;
            }
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SupportDescriptor {
        SupportDescriptor::from_value(json!({
            "$schema": "ignored",
            "tabs": {
                "__compat": { "support": { "chrome": { "version_added": true } } },
                "query": {
                    "__compat": {
                        "support": {
                            "chrome": { "version_added": "20" },
                            "firefox": [
                                { "version_added": "45", "deprecated": true },
                                { "version_added": "40", "experimental": true }
                            ],
                            "safari": { "version_added": null }
                        }
                    }
                },
                "onUpdated": {
                    "addListener": {}
                }
            },
            "runtime": {
                "getBrowserInfo": {
                    "__compat": {
                        "status": { "experimental": true },
                        "support": { "chrome": { "version_added": false } }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_flattened_paths() {
        let descriptor = sample();
        let paths: Vec<&str> = descriptor.paths().collect();
        assert_eq!(paths, vec!["runtime.getBrowserInfo", "tabs", "tabs.query"]);
        assert_eq!(descriptor.areas().collect::<Vec<_>>(), vec!["runtime", "tabs"]);
        assert_eq!(descriptor.len(), 3);
    }

    #[test]
    fn test_statement_variants() {
        let descriptor = sample();
        let query = descriptor.compat("tabs.query").unwrap();
        assert_eq!(
            query.statement_for("chrome").unwrap().version_added,
            Some(VersionAdded::Version("20".to_string()))
        );
        // History entries: the first one is current.
        assert_eq!(
            query.statement_for("firefox").unwrap().version_added,
            Some(VersionAdded::Version("45".to_string()))
        );
        assert!(query.is_deprecated("firefox"));
        assert!(!query.is_experimental("firefox"));
        assert_eq!(query.statement_for("safari").unwrap().version_added, None);
        assert!(query.statement_for("opera").is_none());
    }

    #[test]
    fn test_status_flags_apply_to_every_runtime() {
        let descriptor = sample();
        let info = descriptor.compat("runtime.getBrowserInfo").unwrap();
        assert!(info.is_experimental("chrome"));
        assert!(info.is_experimental("firefox"));
        assert_eq!(
            info.statement_for("chrome").unwrap().version_added,
            Some(VersionAdded::Flag(false))
        );
    }

    #[test]
    fn test_bcd_layout_is_unwrapped() {
        let descriptor = SupportDescriptor::from_value(json!({
            "webextensions": { "api": {
                "alarms": { "create": { "__compat": { "support": {
                    "firefox": { "version_added": "45" }
                } } } }
            } }
        }))
        .unwrap();
        assert!(descriptor.compat("alarms.create").is_some());
        assert_eq!(descriptor.areas().collect::<Vec<_>>(), vec!["alarms"]);
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let err = SupportDescriptor::from_value(json!({
            "tabs": { "query": { "__compat": { "support": { "chrome": { "version_added": 20 } } } } }
        }))
        .unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidEntry { ref path, .. } if path == "tabs.query"));

        let err = SupportDescriptor::from_value(json!(["tabs"])).unwrap_err();
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn test_yaml_descriptor() {
        let descriptor = SupportDescriptor::from_yaml_str(
            r#"
storage:
  session:
    __compat:
      support:
        chrome:
          version_added: "102"
"#,
        )
        .unwrap();
        assert!(descriptor.compat("storage.session").is_some());
    }
}
