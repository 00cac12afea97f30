//! Decoded email - the classifier's view of a message

use serde::{Deserialize, Serialize};

/// Subject, plain-text body and sender address extracted from a message
///
/// Produced once per message by the decoder and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEmail {
    /// Subject with any forwarding markers stripped
    pub subject: String,

    /// Plain-text body with any quoted forwarding preamble stripped
    pub body: String,

    /// Bare sender address, empty when the `From` header is absent or malformed
    pub from_email: String,
}

impl DecodedEmail {
    /// Create a decoded email
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from_email: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from_email: from_email.into(),
        }
    }

    /// Whether this message was sent from the given mailbox address
    ///
    /// An empty mailbox address never matches.
    pub fn is_from(&self, address: &str) -> bool {
        !address.is_empty() && self.from_email.contains(address)
    }
}
