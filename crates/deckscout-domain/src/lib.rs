//! Deckscout Domain Layer
//!
//! Core data model and collaborator contracts for the pitch deck pipeline.
//! Infrastructure implementations (inference backends, mail transport,
//! attachment storage) live in other crates and plug in through the traits
//! defined here.
//!
//! ## Key Concepts
//!
//! - **MailPart**: One node of a message's MIME tree, as returned by the mail API
//! - **DecodedEmail**: Subject, plain-text body and sender extracted from a message
//! - **ProbabilityScore**: A 0-100 score produced by the chat backend
//! - **ClassificationPolicy**: The threshold and repair bound that turn scores into verdicts
//! - **ExtractionResult**: What the pipeline hands back for a message that carries a deck
//!
//! ## Architecture
//!
//! - Entities are transient and request-scoped
//! - No shared mutable state
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attachment;
pub mod chat;
pub mod email;
pub mod mail;
pub mod score;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use attachment::{AttachmentRecord, ExtractionResult};
pub use chat::{ChatMessage, ChatRole};
pub use email::DecodedEmail;
pub use mail::{Header, MailBody, MailMessage, MailPart, MailProfile, MessageRef};
pub use score::{ClassificationPolicy, ProbabilityScore};
pub use tier::Tier;
