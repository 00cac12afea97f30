//! Message decoder: subject, plain-text body and sender out of a message
//!
//! Body lookup walks the part tree depth first but only ever descends into
//! the first child. Siblings after the first are never inspected, so a
//! `text/plain` leaf hanging off a later branch is not found and the body
//! comes back empty.

use crate::error::MailError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use deckscout_domain::mail::find_header;
use deckscout_domain::{DecodedEmail, Header, MailMessage, MailPart};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Marker that precedes the original subject of a forwarded message
const FORWARD_MARKER: &str = "Fwd:";

/// Configuration for the decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Domain of the address on the quoted `To:` line of a forwarding preamble
    pub quoted_domain: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            quoted_domain: "gmail.com".to_string(),
        }
    }
}

/// Decodes raw mail API messages into [`DecodedEmail`]s
#[derive(Debug, Clone)]
pub struct MessageDecoder {
    config: DecoderConfig,
    quoted_preamble: Regex,
}

impl MessageDecoder {
    /// Create a decoder
    ///
    /// # Errors
    ///
    /// Fails when the preamble pattern built from the quoted domain does not
    /// compile.
    pub fn new(config: DecoderConfig) -> Result<Self, MailError> {
        let pattern = format!(r"To:.*?@{}>\s*\n", regex::escape(&config.quoted_domain));
        let quoted_preamble = Regex::new(&pattern)
            .map_err(|e| MailError::Decode(format!("invalid preamble pattern: {}", e)))?;

        Ok(Self {
            config,
            quoted_preamble,
        })
    }

    /// Decode a payload together with its message-level headers
    pub fn decode(&self, payload: &MailPart, headers: &[Header]) -> DecodedEmail {
        DecodedEmail {
            subject: find_subject(headers),
            body: find_body(payload, &self.quoted_preamble),
            from_email: find_from_email(headers),
        }
    }

    /// Decode a full message
    pub fn decode_message(&self, message: &MailMessage) -> DecodedEmail {
        self.decode(&message.payload, message.headers())
    }

    /// Find the plain-text body of a payload
    pub fn find_body(&self, payload: &MailPart) -> String {
        find_body(payload, &self.quoted_preamble)
    }

    /// Configuration in force
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

/// Find the plain-text body, stripping any quoted forwarding preamble
///
/// Returns an empty string when the first-child path bottoms out without a
/// non-empty `text/plain` leaf, or when the leaf's data is not valid base64.
pub fn find_body(payload: &MailPart, quoted_preamble: &Regex) -> String {
    let mut part = payload;

    loop {
        if part.is_plain_text_leaf() {
            let text = match decode_base64url(part.body_data().unwrap_or_default()) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    debug!(error = %e, "Undecodable text/plain body");
                    return String::new();
                }
            };
            return strip_quoted_preamble(text.trim(), quoted_preamble);
        }

        match part.parts.first() {
            Some(first) => part = first,
            None => return String::new(),
        }
    }
}

/// Keep only what follows the last quoted `To: ...@domain>` line
fn strip_quoted_preamble(text: &str, quoted_preamble: &Regex) -> String {
    quoted_preamble
        .split(text)
        .last()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Find the subject, keeping only what follows the last `Fwd:` marker
pub fn find_subject(headers: &[Header]) -> String {
    find_header(headers, "Subject")
        .and_then(|h| h.value.rsplit(FORWARD_MARKER).next())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Find the bare sender address inside `Display Name <address>`
///
/// A missing header or a value without a `<...>` pair yields an empty string.
pub fn find_from_email(headers: &[Header]) -> String {
    find_header(headers, "From")
        .and_then(|h| h.value.split_once('<'))
        .and_then(|(_, rest)| rest.split_once('>'))
        .map(|(address, _)| address.trim().to_string())
        .unwrap_or_default()
}

/// Decode base64 data in either the URL-safe or the standard alphabet,
/// padded or not
pub fn decode_base64url(data: &str) -> Result<Vec<u8>, MailError> {
    let cleaned: String = data
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();

    URL_SAFE_NO_PAD
        .decode(cleaned)
        .map_err(|e| MailError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckscout_domain::MailBody;

    fn encode(text: &str) -> String {
        URL_SAFE_NO_PAD.encode(text)
    }

    fn text_leaf(text: &str) -> MailPart {
        MailPart {
            mime_type: "text/plain".to_string(),
            body: Some(MailBody {
                size: text.len() as u64,
                data: Some(encode(text)),
                attachment_id: None,
            }),
            ..Default::default()
        }
    }

    fn container(parts: Vec<MailPart>) -> MailPart {
        MailPart {
            mime_type: "multipart/mixed".to_string(),
            parts,
            ..Default::default()
        }
    }

    fn decoder() -> MessageDecoder {
        MessageDecoder::new(DecoderConfig::default()).unwrap()
    }

    #[test]
    fn test_body_from_root_leaf() {
        let body = decoder().find_body(&text_leaf("  Hello investors \n"));
        assert_eq!(body, "Hello investors");
    }

    #[test]
    fn test_body_through_first_children() {
        let payload = container(vec![container(vec![text_leaf("Deck inside")])]);
        assert_eq!(decoder().find_body(&payload), "Deck inside");
    }

    #[test]
    fn test_no_backtracking_into_siblings() {
        let html = MailPart {
            mime_type: "text/html".to_string(),
            ..Default::default()
        };
        let payload = container(vec![html, text_leaf("never reached")]);
        assert_eq!(decoder().find_body(&payload), "");
    }

    #[test]
    fn test_empty_plain_text_is_not_a_match() {
        let mut leaf = text_leaf("");
        leaf.body = Some(MailBody::default());
        assert_eq!(decoder().find_body(&container(vec![leaf])), "");
    }

    #[test]
    fn test_forwarding_preamble_is_stripped() {
        let text = "---------- Forwarded message ---------\n\
                    From: Founder <founder@startup.io>\n\
                    Date: Mon, 1 Jan 2024\n\
                    Subject: Our deck\n\
                    To: Partner <partner@gmail.com>\n\n\
                    Hi, please find our deck attached.\n";
        assert_eq!(
            decoder().find_body(&text_leaf(text)),
            "Hi, please find our deck attached."
        );
    }

    #[test]
    fn test_preamble_domain_is_configurable() {
        let decoder = MessageDecoder::new(DecoderConfig {
            quoted_domain: "fund.vc".to_string(),
        })
        .unwrap();
        let text = "To: Me <me@fund.vc>\nOriginal text";
        assert_eq!(decoder.find_body(&text_leaf(text)), "Original text");

        let other = "To: Me <me@gmail.com>\nOriginal text";
        assert_eq!(decoder.find_body(&text_leaf(other)), other);
    }

    #[test]
    fn test_invalid_base64_yields_empty_body() {
        let mut leaf = text_leaf("x");
        leaf.body = Some(MailBody {
            size: 4,
            data: Some("!!!!".to_string()),
            attachment_id: None,
        });
        assert_eq!(decoder().find_body(&leaf), "");
    }

    #[test]
    fn test_decode_accepts_both_alphabets() {
        assert_eq!(decode_base64url("aGk_Pz8=").unwrap(), b"hi???");
        assert_eq!(decode_base64url("aGk/Pz8=").unwrap(), b"hi???");
        assert_eq!(decode_base64url("aGk_Pz8").unwrap(), b"hi???");
    }

    #[test]
    fn test_subject_after_last_forward_marker() {
        let headers = vec![Header::new("Subject", "Fwd: Fwd: Quarterly Update")];
        assert_eq!(find_subject(&headers), "Quarterly Update");
    }

    #[test]
    fn test_subject_without_marker_or_header() {
        assert_eq!(find_subject(&[Header::new("Subject", "  Seed round ")]), "Seed round");
        assert_eq!(find_subject(&[]), "");
    }

    #[test]
    fn test_from_email() {
        let headers = vec![Header::new("From", "Jane Doe <jane@x.com>")];
        assert_eq!(find_from_email(&headers), "jane@x.com");
    }

    #[test]
    fn test_from_email_malformed() {
        assert_eq!(find_from_email(&[Header::new("From", "noheader")]), "");
        assert_eq!(find_from_email(&[Header::new("From", "Jane <jane@x.com")]), "");
        assert_eq!(find_from_email(&[]), "");
    }

    #[test]
    fn test_decode_message() {
        let mut payload = container(vec![text_leaf("Deck attached")]);
        payload.headers = vec![
            Header::new("From", "Founder <founder@startup.io>"),
            Header::new("Subject", "Fwd: Seed deck"),
        ];
        let message = MailMessage {
            id: "m1".to_string(),
            thread_id: "t1".to_string(),
            payload,
        };

        let decoded = decoder().decode_message(&message);
        assert_eq!(
            decoded,
            DecodedEmail::new("Seed deck", "Deck attached", "founder@startup.io")
        );
    }
}
