//! Attachment records and extraction results

use serde::{Deserialize, Serialize};

/// An attachment ready to be handed to storage
///
/// Ownership passes to the storage collaborator as soon as the record is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRecord {
    /// Collision-resistant name the attachment is stored under
    pub generated_file_name: String,

    /// File name the sender attached it with
    pub source_file_name: String,

    /// Decoded attachment content
    pub bytes: Vec<u8>,
}

impl AttachmentRecord {
    /// Size of the attachment in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the attachment is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Terminal output of the pipeline for a message that carries a pitch deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Decoded subject
    pub subject: String,

    /// Decoded body
    pub body: String,

    /// Generated file names, in the order the parts were encountered
    pub attachments: Vec<String>,

    /// Sender address
    pub from: String,
}
