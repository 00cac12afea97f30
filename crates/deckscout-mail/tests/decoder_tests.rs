//! Integration tests for deckscout-mail
//!
//! These tests decode realistic Gmail payloads and check the decoder's
//! traversal and header rules over generated inputs.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use deckscout_domain::{Header, MailBody, MailMessage, MailPart};
use deckscout_mail::{find_subject, DecoderConfig, MessageDecoder};
use proptest::prelude::*;

fn decoder() -> MessageDecoder {
    MessageDecoder::new(DecoderConfig::default()).unwrap()
}

fn text_leaf(text: &str) -> MailPart {
    MailPart {
        mime_type: "text/plain".to_string(),
        body: Some(MailBody {
            size: text.len() as u64,
            data: Some(URL_SAFE.encode(text)),
            attachment_id: None,
        }),
        ..Default::default()
    }
}

fn non_text_leaf(mime_type: &str) -> MailPart {
    MailPart {
        mime_type: mime_type.to_string(),
        body: Some(MailBody {
            size: 42,
            data: Some(URL_SAFE.encode("<p>html</p>")),
            attachment_id: None,
        }),
        ..Default::default()
    }
}

#[test]
fn test_forwarded_gmail_message() {
    let json = serde_json::json!({
        "id": "18c1",
        "threadId": "18c1",
        "payload": {
            "mimeType": "multipart/mixed",
            "headers": [
                {"name": "From", "value": "Ada Founder <ada@startup.io>"},
                {"name": "Subject", "value": "Fwd: Fwd: Acme seed deck"}
            ],
            "parts": [
                {
                    "mimeType": "multipart/alternative",
                    "parts": [
                        {"mimeType": "text/plain", "body": {"size": 120, "data": URL_SAFE.encode(
                            "---------- Forwarded message ---------\n\
                             From: Ada Founder <ada@startup.io>\n\
                             To: Partner <partner@gmail.com>\n\n\
                             Hi! Our seed deck is attached.\n\nAda\n"
                        )}},
                        {"mimeType": "text/html", "body": {"size": 10, "data": "PHA-"}}
                    ]
                },
                {"mimeType": "application/pdf", "filename": "acme.pdf",
                 "body": {"size": 2048, "attachmentId": "att-1"}}
            ]
        }
    });
    let message: MailMessage = serde_json::from_value(json).unwrap();

    let email = decoder().decode_message(&message);
    assert_eq!(email.subject, "Acme seed deck");
    assert_eq!(email.from_email, "ada@startup.io");
    assert_eq!(email.body, "Hi! Our seed deck is attached.\n\nAda");
}

#[test]
fn test_lowercase_header_names_are_found() {
    let headers = vec![
        Header::new("subject", "Deck"),
        Header::new("from", "A <a@b.io>"),
    ];
    let email = decoder().decode(&MailPart::default(), &headers);
    assert_eq!(email.subject, "Deck");
    assert_eq!(email.from_email, "a@b.io");
}

proptest! {
    #[test]
    fn prop_first_child_path_without_text_yields_empty_body(
        depth in 0usize..6,
        sibling_text in "[a-zA-Z ]{1,40}",
    ) {
        // First-child chain ending in a non-text leaf, with a plain-text
        // sibling hanging off every level.
        let mut part = non_text_leaf("text/html");
        for _ in 0..depth {
            part = MailPart {
                mime_type: "multipart/mixed".to_string(),
                parts: vec![part, text_leaf(&sibling_text)],
                ..Default::default()
            };
        }

        prop_assert_eq!(decoder().find_body(&part), "");
    }

    #[test]
    fn prop_first_child_text_leaf_is_found(
        depth in 0usize..6,
        text in "[a-zA-Z][a-zA-Z ]{0,40}[a-zA-Z]",
    ) {
        let mut part = text_leaf(&text);
        for _ in 0..depth {
            part = MailPart {
                mime_type: "multipart/alternative".to_string(),
                parts: vec![part, non_text_leaf("text/html")],
                ..Default::default()
            };
        }

        prop_assert_eq!(decoder().find_body(&part), text);
    }

    #[test]
    fn prop_subject_keeps_text_after_last_marker(
        prefix_count in 0usize..4,
        subject in "[a-zA-Z0-9 ]{0,30}",
    ) {
        let value = format!("{}{}", "Fwd: ".repeat(prefix_count), subject);
        let headers = vec![Header::new("Subject", value)];
        prop_assert_eq!(find_subject(&headers), subject.trim());
    }
}
