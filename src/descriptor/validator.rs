//! Descriptor validator using JSON Schema

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use super::error::DescriptorError;

/// Validates raw descriptor documents against the embedded schema.
///
/// Structural problems (a number where a version string belongs, a support
/// map that is not an object) are reported with their instance paths before
/// the document is flattened.
pub struct DescriptorValidator {
    schema: JSONSchema,
}

impl DescriptorValidator {
    pub fn new() -> Result<Self, DescriptorError> {
        let schema_value: Value = serde_json::from_str(Self::embedded_schema())
            .map_err(|e| DescriptorError::Internal(format!("Invalid JSON Schema: {}", e)))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| DescriptorError::Internal(format!("Failed to compile schema: {}", e)))?;

        Ok(Self { schema })
    }

    fn embedded_schema() -> &'static str {
        include_str!("schema_descriptor.json")
    }

    pub fn validate(&self, document: &Value) -> Result<(), DescriptorError> {
        if let Err(errors) = self.schema.validate(document) {
            let messages: Vec<String> = errors
                .map(|e| {
                    let at = e.instance_path.to_string();
                    if at.is_empty() {
                        e.to_string()
                    } else {
                        format!("{} (at {})", e, at)
                    }
                })
                .collect();
            return Err(DescriptorError::SchemaError {
                errors: messages,
                hint: None,
            }
            .with_hint("Each __compat.support.<runtime> entry needs version_added: true, false or a version string."));
        }
        Ok(())
    }
}
