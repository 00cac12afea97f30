//! Configuration for extraction and scanning
//!
//! Defines which messages qualify for extraction and how the mailbox is
//! scanned.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest page the mail API hands out in one listing call
pub const MAX_RESULTS_LIMIT: u32 = 500;

/// Where attachments are expected to sit in a message's top-level parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentLayout {
    /// Body at index 0, attachments from index 1 on; the part at index 1
    /// must carry an attachment id for the message to qualify
    #[default]
    Positional,

    /// Any top-level part carrying an attachment id qualifies the message,
    /// and every such part is fetched
    AnyPart,
}

/// Configuration for the extractor and the scanner
///
/// # Examples
///
/// ```
/// use deckscout_extractor::{AttachmentLayout, ExtractorConfig};
///
/// let config = ExtractorConfig::default();
/// assert_eq!(config.attachment_layout, AttachmentLayout::Positional);
/// assert_eq!(config.max_results, 100);
///
/// let config = ExtractorConfig::from_toml("attachment_layout = \"any_part\"").unwrap();
/// assert_eq!(config.attachment_layout, AttachmentLayout::AnyPart);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Which part layout qualifies a message
    pub attachment_layout: AttachmentLayout,

    /// Messages processed concurrently during a scan
    /// Default: 4
    pub concurrency: usize,

    /// Seconds between scans in watch mode
    /// Default: 300 (5 minutes)
    pub poll_interval_secs: u64,

    /// Newest messages listed per scan
    /// Default: 100
    pub max_results: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            attachment_layout: AttachmentLayout::Positional,
            concurrency: 4,
            poll_interval_secs: 300,
            max_results: 100,
        }
    }
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be greater than 0".to_string());
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(format!(
                "max_results must be between 1 and {}",
                MAX_RESULTS_LIMIT
            ));
        }
        Ok(())
    }

    /// Get the poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
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
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.attachment_layout, AttachmentLayout::Positional);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let zero_concurrency = ExtractorConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(zero_concurrency.validate().is_err());

        let zero_interval = ExtractorConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(zero_interval.validate().is_err());

        let too_many = ExtractorConfig {
            max_results: MAX_RESULTS_LIMIT + 1,
            ..Default::default()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ExtractorConfig {
            attachment_layout: AttachmentLayout::AnyPart,
            concurrency: 8,
            poll_interval_secs: 60,
            max_results: 250,
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: ExtractorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);

        let toml = config.to_toml().unwrap();
        assert!(toml.contains("attachment_layout = \"any_part\""));
        assert_eq!(ExtractorConfig::from_toml(&toml).unwrap(), config);
    }
}
