//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use deckscout_classifier::ClassifierConfig;
use deckscout_extractor::ExtractorConfig;
use deckscout_mail::DEFAULT_ATTACHMENTS_DIR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Mail API access
    #[serde(default)]
    pub gmail: GmailSettings,

    /// Primary inference backend
    #[serde(default)]
    pub huggingface: HuggingFaceSettings,

    /// Secondary inference backend
    #[serde(default)]
    pub openai: OpenAiSettings,

    /// Classification policy
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Extraction and scanning
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Attachment storage
    #[serde(default)]
    pub storage: StorageSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Mail API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmailSettings {
    /// OAuth access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// API base URL for the authenticated user
    pub base_url: String,

    /// Mailbox address used for the self-sent check (profile address if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_address: Option<String>,

    /// Domain on the quoted `To:` line of forwarded messages
    pub quoted_domain: String,
}

/// HuggingFace inference settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuggingFaceSettings {
    /// Bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Inference endpoint
    pub endpoint: String,

    /// Model repository id
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// OpenAI chat settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Chat model
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Attachment storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory attachments are written to
    pub attachments_dir: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".deckscout").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check component configurations.
    pub fn validate(&self) -> Result<()> {
        self.classifier
            .validate()
            .map_err(|e| CliError::Config(format!("[classifier] {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        Ok(())
    }

    /// Copy with credentials replaced by a placeholder, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for secret in [
            &mut config.gmail.access_token,
            &mut config.huggingface.access_token,
            &mut config.openai.api_key,
        ] {
            if secret.is_some() {
                *secret = Some("********".to_string());
            }
        }
        config
    }
}

impl Default for GmailSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: deckscout_mail::gmail::DEFAULT_BASE_URL.to_string(),
            self_address: None,
            quoted_domain: "gmail.com".to_string(),
        }
    }
}

impl Default for HuggingFaceSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            endpoint: deckscout_llm::huggingface::DEFAULT_ENDPOINT.to_string(),
            model: deckscout_llm::huggingface::DEFAULT_MODEL.to_string(),
            timeout_secs: deckscout_llm::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: deckscout_llm::openai::DEFAULT_BASE_URL.to_string(),
            model: deckscout_llm::openai::DEFAULT_MODEL.to_string(),
            timeout_secs: deckscout_llm::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            attachments_dir: PathBuf::from(DEFAULT_ATTACHMENTS_DIR),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
