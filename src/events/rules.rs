//! Declarative rule payloads and their structural validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::{Error, Result};

/// Field naming the variant of an action or condition entry.
pub const INSTANCE_TYPE: &str = "instanceType";

/// A declarative rule as the host's rule registry stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Assigned by the native side when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<Value>,
    #[serde(default)]
    pub actions: Vec<Value>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_condition(mut self, condition: Value) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_action(mut self, action: Value) -> Self {
        self.actions.push(action);
        self
    }
}

/// Checks and transforms rules before they reach the native `addRules`.
pub trait RuleValidator: Send + Sync {
    /// Validate `rules` and return the payload to hand to the native call.
    fn validate(&self, rules: Vec<Rule>) -> Result<Vec<Value>>;
}

/// Accepts only actions and conditions whose `instanceType` belongs to a
/// closed set of recognized variants.
#[derive(Debug, Clone, Default)]
pub struct VariantRuleValidator {
    actions: BTreeSet<String>,
    conditions: BTreeSet<String>,
}

impl VariantRuleValidator {
    pub fn new<A, C>(actions: A, conditions: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            actions: actions.into_iter().map(Into::into).collect(),
            conditions: conditions.into_iter().map(Into::into).collect(),
        }
    }

    /// Variants understood by the page-state rule registry.
    pub fn declarative_content() -> Self {
        Self::new(
            [
                "declarativeContent.ShowAction",
                "declarativeContent.ShowPageAction",
                "declarativeContent.SetIcon",
                "declarativeContent.RequestContentScript",
            ],
            ["declarativeContent.PageStateMatcher"],
        )
    }

    pub fn with_action(mut self, variant: impl Into<String>) -> Self {
        self.actions.insert(variant.into());
        self
    }

    pub fn with_condition(mut self, variant: impl Into<String>) -> Self {
        self.conditions.insert(variant.into());
        self
    }

    fn check_rule(&self, rule: &Rule) -> Result<()> {
        if rule.actions.is_empty() {
            return Err(Error::rule_validation("At least one action is required"));
        }
        if rule.conditions.is_empty() {
            return Err(Error::rule_validation("At least one condition is required"));
        }
        for action in &rule.actions {
            match instance_type(action) {
                Some(kind) if self.actions.contains(kind) => {}
                Some(kind) => {
                    return Err(Error::rule_validation(format!(
                        "Unsupported action type \"{}\"",
                        kind
                    )))
                }
                None => return Err(Error::rule_validation("Action is missing instanceType")),
            }
        }
        for condition in &rule.conditions {
            match instance_type(condition) {
                Some(kind) if self.conditions.contains(kind) => {}
                Some(kind) => {
                    return Err(Error::rule_validation(format!(
                        "Unsupported condition type \"{}\"",
                        kind
                    )))
                }
                None => return Err(Error::rule_validation("Condition is missing instanceType")),
            }
        }
        Ok(())
    }
}

impl RuleValidator for VariantRuleValidator {
    fn validate(&self, rules: Vec<Rule>) -> Result<Vec<Value>> {
        rules
            .iter()
            .map(|rule| {
                self.check_rule(rule)?;
                Ok(serde_json::to_value(rule)?)
            })
            .collect()
    }
}

fn instance_type(entry: &Value) -> Option<&str> {
    entry.get(INSTANCE_TYPE).and_then(Value::as_str)
}
