//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Field Extractor
///
/// Low temperature and a small token budget favour short, deterministic,
/// well-formed JSON over prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Chat model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens the model may generate
    pub max_tokens: u32,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 300);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_model() {
        let config = ExtractorConfig::default().with_model("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = ExtractorConfig::default();
        config.temperature = 2.5;
        assert!(config.validate().is_err());

        config.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_max_tokens() {
        let mut config = ExtractorConfig::default();
        config.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExtractorConfig::from_toml(r#"model = "gpt-4o-mini""#).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 300);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default().with_model("gpt-4.1");
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
