//! Descriptor loader for local JSON and YAML files

use std::path::{Path, PathBuf};

use super::error::DescriptorError;
use super::support::SupportDescriptor;
use super::validator::DescriptorValidator;

/// Environment variable naming a descriptor file or a directory of descriptors.
pub const DESCRIPTOR_ENV: &str = "WEBEXT_COMPAT_DESCRIPTOR";

/// Loads support descriptors from disk.
pub struct DescriptorLoader {
    base_path: Option<PathBuf>,
    validator: Option<DescriptorValidator>,
}

impl DescriptorLoader {
    /// Loader with schema validation enabled.
    pub fn new() -> Result<Self, DescriptorError> {
        Ok(Self {
            base_path: None,
            validator: Some(DescriptorValidator::new()?),
        })
    }

    /// Loader that only checks what flattening needs.
    pub fn without_validation() -> Self {
        Self {
            base_path: None,
            validator: None,
        }
    }

    /// Set base directory for named descriptors
    pub fn with_base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load descriptor `name` ("webextensions" -> `webextensions.json`).
    ///
    /// Search order: the configured base path, then `WEBEXT_COMPAT_DESCRIPTOR`
    /// (a directory, or a file used as-is), then `./descriptors`.
    pub async fn load(&self, name: &str) -> Result<SupportDescriptor, DescriptorError> {
        let mut dirs: Vec<PathBuf> = Vec::new();

        if let Some(ref base) = self.base_path {
            dirs.push(base.clone());
        }

        if let Ok(root) = std::env::var(DESCRIPTOR_ENV) {
            let root = PathBuf::from(root);
            if root.is_file() {
                return self.load_from_file(&root).await;
            }
            dirs.push(root);
        }

        dirs.push(PathBuf::from("descriptors"));

        for dir in &dirs {
            for ext in ["json", "yaml", "yml"] {
                let candidate = dir.join(format!("{}.{}", name, ext));
                if candidate.exists() {
                    return self.load_from_file(&candidate).await;
                }
            }
        }

        Err(DescriptorError::NotFound {
            name: name.to_string(),
            hint: Some(format!(
                "Searched {}. Set {} to a descriptor file or directory.",
                dirs.iter()
                    .map(|d| d.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                DESCRIPTOR_ENV
            )),
        })
    }

    /// Load a descriptor file; the format follows the extension (JSON unless `.yaml`/`.yml`).
    pub async fn load_from_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<SupportDescriptor, DescriptorError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DescriptorError::LoadError {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
                hint: Some("Check if the file exists and you have read permissions.".to_string()),
            })?;

        let body = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            &bytes[3..]
        } else {
            &bytes[..]
        };
        let content = std::str::from_utf8(body).map_err(|e| DescriptorError::LoadError {
            path: path.to_string_lossy().to_string(),
            reason: format!("Invalid UTF-8: {}", e),
            hint: None,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let document: serde_json::Value = if is_yaml {
            serde_yaml::from_str(content).map_err(|e| DescriptorError::ParseError {
                reason: format!("{}: invalid YAML: {}", path.display(), e),
                hint: None,
            })?
        } else {
            serde_json::from_str(content).map_err(|e| DescriptorError::ParseError {
                reason: format!("{}: invalid JSON: {}", path.display(), e),
                hint: None,
            })?
        };

        if let Some(ref validator) = self.validator {
            validator.validate(&document)?;
        }

        let descriptor = SupportDescriptor::from_value(document)?;
        tracing::debug!(
            path = %path.display(),
            entries = descriptor.len(),
            "loaded support descriptor"
        );
        Ok(descriptor)
    }
}

impl Default for DescriptorLoader {
    fn default() -> Self {
        Self::without_validation()
    }
}
