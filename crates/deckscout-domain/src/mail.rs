//! Mail module - the message shapes returned by the mail API
//!
//! These types mirror the Gmail REST representation (camelCase field names),
//! so a transport can deserialize responses directly into them.

use serde::{Deserialize, Serialize};

/// A single `(name, value)` header entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name, e.g. `Subject`
    pub name: String,

    /// Raw header value
    #[serde(default)]
    pub value: String,
}

impl Header {
    /// Create a new header entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Find the first header with the given name (ASCII case-insensitive)
pub fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a Header> {
    headers.iter().find(|h| h.name.eq_ignore_ascii_case(name))
}

/// Body of a mail part
///
/// Small bodies are carried inline in `data`; attachments carry an
/// `attachment_id` that must be fetched separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailBody {
    /// Size of the body in bytes
    #[serde(default)]
    pub size: u64,

    /// Inline data in its transport encoding (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Identifier of an attachment stored out of line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
}

/// One node of a message's MIME part tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailPart {
    /// Part identifier within the message (e.g. `0`, `1.2`)
    #[serde(default)]
    pub part_id: String,

    /// MIME type, e.g. `text/plain` or `multipart/alternative`
    #[serde(default)]
    pub mime_type: String,

    /// Original file name for attachment parts, empty otherwise
    #[serde(default)]
    pub filename: String,

    /// Headers of this part (the root part carries the message headers)
    #[serde(default)]
    pub headers: Vec<Header>,

    /// Body of this part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MailBody>,

    /// Child parts
    #[serde(default)]
    pub parts: Vec<MailPart>,
}

impl MailPart {
    /// Inline body size, zero when the part has no body
    pub fn body_size(&self) -> u64 {
        self.body.as_ref().map(|b| b.size).unwrap_or(0)
    }

    /// Inline body data, if any
    pub fn body_data(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.data.as_deref())
    }

    /// Attachment identifier, if this part is an attachment
    pub fn attachment_id(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.attachment_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Whether this part is a non-empty `text/plain` leaf
    pub fn is_plain_text_leaf(&self) -> bool {
        self.mime_type == "text/plain" && self.body_size() > 0
    }
}

/// A full message as returned by the mail API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMessage {
    /// Provider message identifier
    pub id: String,

    /// Provider thread identifier
    #[serde(default)]
    pub thread_id: String,

    /// Root part of the message
    #[serde(default)]
    pub payload: MailPart,
}

impl MailMessage {
    /// Message-level headers (carried on the root part)
    pub fn headers(&self) -> &[Header] {
        &self.payload.headers
    }
}

/// A message reference as returned by a listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    /// Provider message identifier
    pub id: String,

    /// Provider thread identifier
    #[serde(default)]
    pub thread_id: String,
}

/// Profile of the mailbox owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailProfile {
    /// Address of the mailbox owner
    pub email_address: String,

    /// Total number of messages in the mailbox
    #[serde(default)]
    pub messages_total: u64,
}
