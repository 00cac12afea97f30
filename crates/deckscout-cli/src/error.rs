//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required credential not supplied
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Inference backend setup error
    #[error("Backend error: {0}")]
    Llm(#[from] deckscout_llm::LlmError),

    /// Mail layer error
    #[error("Mail error: {0}")]
    Mail(#[from] deckscout_mail::MailError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extractor(#[from] deckscout_extractor::ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
