//! Generation configuration
//!
//! The configuration surface consumed by the code generation engine: target
//! language, package coordinates, the six feature flags, and an open-ended
//! options map for language-specific tuning. Configs can be built in code or
//! loaded from a YAML file.

use crate::schema::ProviderCapabilities;
use crate::{GeneratorError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Supported target languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    TypeScript,
    Python,
    Go,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::TypeScript => "typescript",
            TargetLanguage::Python => "python",
            TargetLanguage::Go => "go",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated package coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub license: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// The six generation feature flags
///
/// Tests and docs default to on. Streaming and rate limiting are
/// tri-state: left unset they follow the provider's capability flags,
/// set explicitly they win.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureFlags {
    pub generate_tests: bool,
    pub generate_docs: bool,
    pub generate_examples: bool,
    pub include_retry: bool,
    pub include_rate_limiting: Option<bool>,
    pub include_streaming: Option<bool>,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            generate_tests: true,
            generate_docs: true,
            generate_examples: false,
            include_retry: true,
            include_rate_limiting: None,
            include_streaming: None,
        }
    }
}

impl FeatureFlags {
    /// Whether streaming utilities should be emitted for a provider
    pub fn streaming(&self, capabilities: &ProviderCapabilities) -> bool {
        self.include_streaming.unwrap_or(capabilities.streaming)
    }

    /// Whether rate-limiting utilities should be emitted for a provider
    ///
    /// Defaults to on when any endpoint could carry a rate limit, which for
    /// LLM providers is effectively always; the capability flag is the
    /// provider's streaming-unrelated signal, so the unset default is true.
    pub fn rate_limiting(&self, _capabilities: &ProviderCapabilities) -> bool {
        self.include_rate_limiting.unwrap_or(true)
    }
}

/// Configuration for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub language: TargetLanguage,

    /// Where the external collaborator should place the files; the engine
    /// itself never writes
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    pub package: PackageInfo,

    #[serde(default)]
    pub features: FeatureFlags,

    /// Open-ended language-specific options (e.g. "timeoutMs")
    #[serde(default)]
    pub options: IndexMap<String, serde_json::Value>,
}

fn default_output_dir() -> String {
    "generated".to_string()
}

impl GenerationConfig {
    /// Config with defaults for the given language and package name
    pub fn new(language: TargetLanguage, package_name: &str) -> Self {
        Self {
            language,
            output_dir: default_output_dir(),
            package: PackageInfo {
                name: package_name.to_string(),
                version: default_version(),
                author: None,
                license: None,
            },
            features: FeatureFlags::default(),
            options: IndexMap::new(),
        }
    }

    /// Load a config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse config YAML: {}", e)))
    }

    /// String-valued language-specific option, if present
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feature_flags() {
        let flags = FeatureFlags::default();
        assert!(flags.generate_tests);
        assert!(flags.generate_docs);
        assert!(!flags.generate_examples);
        assert!(flags.include_retry);
        assert!(flags.include_streaming.is_none());
    }

    #[test]
    fn test_streaming_follows_capability_when_unset() {
        let flags = FeatureFlags::default();
        let with_streaming = ProviderCapabilities {
            streaming: true,
            ..Default::default()
        };
        let without_streaming = ProviderCapabilities::default();

        assert!(flags.streaming(&with_streaming));
        assert!(!flags.streaming(&without_streaming));
    }

    #[test]
    fn test_explicit_streaming_flag_wins() {
        let flags = FeatureFlags {
            include_streaming: Some(true),
            ..Default::default()
        };
        assert!(flags.streaming(&ProviderCapabilities::default()));
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
language: typescript
package:
  name: "@acme/llm-client"
  version: "1.2.0"
features:
  generateExamples: true
options:
  timeoutMs: 30000
"#;
        let config = GenerationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.language, TargetLanguage::TypeScript);
        assert_eq!(config.package.name, "@acme/llm-client");
        assert!(config.features.generate_examples);
        assert!(config.features.generate_tests);
        assert_eq!(
            config.options.get("timeoutMs").and_then(|v| v.as_u64()),
            Some(30000)
        );
    }
}
