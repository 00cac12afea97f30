//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Implementations live in other crates and are constructed
//! explicitly and injected, never reached through globals.

use crate::{AttachmentRecord, ChatMessage, MailMessage, MailProfile, MessageRef};
use async_trait::async_trait;

/// Trait for reading messages from a mailbox
///
/// Implemented by the infrastructure layer (deckscout-mail)
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Error type for transport operations
    type Error: std::fmt::Display + Send;

    /// Fetch a full message by id
    async fn get_message(&self, id: &str) -> Result<MailMessage, Self::Error>;

    /// Fetch the decoded bytes of an attachment
    async fn get_attachment(
        &self,
        attachment_id: &str,
        message_id: &str,
    ) -> Result<Vec<u8>, Self::Error>;

    /// List the most recent messages
    async fn list_messages(&self, max_results: u32) -> Result<Vec<MessageRef>, Self::Error>;

    /// Profile of the mailbox owner
    async fn get_profile(&self) -> Result<MailProfile, Self::Error>;
}

/// Trait for persisting extracted attachments
///
/// Implemented by the infrastructure layer (deckscout-mail)
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Error type for storage operations
    type Error: std::fmt::Display + Send;

    /// Persist an attachment under its generated file name
    async fn save(&self, record: AttachmentRecord) -> Result<(), Self::Error>;
}

/// Trait for the primary, text-generation inference backend
///
/// Implemented by the infrastructure layer (deckscout-llm)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Error type for generation calls
    type Error: std::fmt::Display + Send;

    /// Send a single prompt and return the raw JSON response payload
    ///
    /// The payload is returned uninterpreted: a successful generation is an
    /// array of `{"generated_text": ...}` objects, anything else is the
    /// backend's own error shape.
    async fn generate(&self, inputs: &str) -> Result<serde_json::Value, Self::Error>;
}

/// Trait for the secondary, chat-completion inference backend
///
/// Implemented by the infrastructure layer (deckscout-llm)
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Error type for completion calls
    type Error: std::fmt::Display + Send;

    /// Send an ordered conversation and return the completion text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error>;
}
