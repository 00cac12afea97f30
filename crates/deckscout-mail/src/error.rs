//! Error types for mail access and attachment storage

use thiserror::Error;

/// Errors that can occur talking to the mail API or writing attachments
#[derive(Error, Debug)]
pub enum MailError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail API answered with a non-success status
    #[error("Mail API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Message or attachment does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
