//! Error types for the classifier

use thiserror::Error;

/// Errors that can occur during classification
///
/// None of these escape `PitchDeckClassifier::classify`, which fails closed;
/// they surface from the individual tiers and from configuration loading.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Primary backend call failed
    #[error("Primary backend error: {0}")]
    Primary(String),

    /// Primary backend answered something other than yes or no
    #[error("Unexpected answer: {0}")]
    UnexpectedAnswer(String),

    /// Backend response did not have the expected shape
    #[error("Invalid response shape: {0}")]
    InvalidShape(String),

    /// Secondary backend call failed
    #[error("Secondary backend error: {0}")]
    Secondary(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
