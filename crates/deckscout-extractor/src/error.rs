//! Error types for attachment extraction

use thiserror::Error;

/// Errors that can occur while extracting attachments
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Mail API call failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Attachment could not be stored
    #[error("Storage error: {0}")]
    Storage(String),
}
