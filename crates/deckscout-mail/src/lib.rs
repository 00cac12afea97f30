//! Deckscout Mail Layer
//!
//! Everything that touches the mailbox: decoding messages, talking to the
//! Gmail API, naming and storing attachments.
//!
//! # Architecture
//!
//! - `MessageDecoder`: subject, plain-text body and sender out of a message
//! - `GmailTransport`: `MailTransport` over the Gmail REST API
//! - `FilesystemStore`: `AttachmentStore` writing into a directory
//! - `FileNamer`: collision-free generated file names
//! - `MockMailTransport` / `MemoryStore`: in-memory doubles for testing
//!
//! # Examples
//!
//! ```
//! use deckscout_mail::{DecoderConfig, MessageDecoder};
//! use deckscout_domain::{Header, MailPart};
//!
//! let decoder = MessageDecoder::new(DecoderConfig::default()).unwrap();
//! let headers = vec![
//!     Header::new("Subject", "Fwd: Seed deck"),
//!     Header::new("From", "Founder <founder@startup.io>"),
//! ];
//!
//! let email = decoder.decode(&MailPart::default(), &headers);
//! assert_eq!(email.subject, "Seed deck");
//! assert_eq!(email.from_email, "founder@startup.io");
//! assert_eq!(email.body, "");
//! ```

#![warn(missing_docs)]

pub mod decoder;
mod error;
pub mod gmail;
mod mock;
pub mod naming;
pub mod storage;

pub use decoder::{
    decode_base64url, find_body, find_from_email, find_subject, DecoderConfig, MessageDecoder,
};
pub use error::MailError;
pub use gmail::GmailTransport;
pub use mock::{MemoryStore, MockMailTransport};
pub use naming::{generate_file_name, FileNamer};
pub use storage::{FilesystemStore, DEFAULT_ATTACHMENTS_DIR};
