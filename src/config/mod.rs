//! Cleanup configuration surface.
//!
//! The surrounding application owns config loading; this is the section it
//! hands to [`TextCleaner::from_config`](crate::TextCleaner::from_config) at
//! construction.

use serde::{Deserialize, Serialize};

/// Cleanup section of the application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// One of "off", "light", "standard", "aggressive".
    pub level: String,
    /// Keep intentional emphasis ("very very") and verb usage of filler
    /// vocabulary ("I like pizza").
    pub preserve_intentional: bool,
    /// Credential for the language-model rewrite. Optional; without it the
    /// aggressive level degrades to the standard pipeline.
    pub api_key: Option<String>,
    /// Endpoint override for OpenAI-compatible self-hosted gateways.
    pub api_endpoint: Option<String>,
    /// Rewrite model name override.
    pub model: Option<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            level: "standard".to_string(),
            preserve_intentional: true,
            api_key: None,
            api_endpoint: None,
            model: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CleanupConfig::default();
        assert_eq!(config.level, "standard");
        assert!(config.preserve_intentional);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CleanupConfig = toml::from_str("level = \"light\"").unwrap();
        assert_eq!(config.level, "light");
        assert!(config.preserve_intentional);
        assert!(config.model.is_none());
    }

    #[test]
    fn test_full_toml_section() {
        let config: CleanupConfig = toml::from_str(
            r#"
            level = "aggressive"
            preserve_intentional = false
            api_key = "gsk_test"
            "#,
        )
        .unwrap();
        assert_eq!(config.level, "aggressive");
        assert!(!config.preserve_intentional);
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
    }
}
