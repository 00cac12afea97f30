//! Configuration for the classifier

use deckscout_domain::score::{DEFAULT_MAX_REPAIR_ATTEMPTS, DEFAULT_THRESHOLD};
use deckscout_domain::ClassificationPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum probability (0-100) for a positive verdict
    pub threshold: u8,

    /// Attempt number at which score repair gives up
    pub max_repair_attempts: u32,

    /// Truncate the normalized body to this many characters (0 = no limit)
    pub max_body_chars: usize,
}

impl ClassifierConfig {
    /// Policy derived from this configuration
    pub fn policy(&self) -> ClassificationPolicy {
        ClassificationPolicy::new(self.threshold, self.max_repair_attempts)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.threshold > 100 {
            return Err("threshold must be between 0 and 100".to_string());
        }
        if self.max_repair_attempts == 0 {
            return Err("max_repair_attempts must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_repair_attempts: DEFAULT_MAX_REPAIR_ATTEMPTS,
            max_body_chars: 0,
        }
    }
}

impl ClassifierConfig {
    /// Strict preset: higher bar, fewer repair calls, bounded prompt size
    pub fn strict() -> Self {
        Self {
            threshold: 75,
            max_repair_attempts: 3,
            max_body_chars: 4_000,
        }
    }

    /// Lenient preset: lower bar, default repair bound
    pub fn lenient() -> Self {
        Self {
            threshold: 45,
            max_repair_attempts: DEFAULT_MAX_REPAIR_ATTEMPTS,
            max_body_chars: 0,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.policy(), ClassificationPolicy::default());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ClassifierConfig::strict().validate().is_ok());
        assert!(ClassifierConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = ClassifierConfig {
            threshold: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_repair_bound() {
        let config = ClassifierConfig {
            max_repair_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClassifierConfig::from_toml("threshold = 70").unwrap();
        assert_eq!(config.threshold, 70);
        assert_eq!(config.max_repair_attempts, DEFAULT_MAX_REPAIR_ATTEMPTS);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig::strict();
        let parsed = ClassifierConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
