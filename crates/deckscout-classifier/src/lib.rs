//! Deckscout Classifier
//!
//! Decides whether an email carries a pitch deck.
//!
//! # Overview
//!
//! Classification runs in two tiers. The primary tier asks a text-generation
//! backend a yes/no question. When that fails for any reason, the secondary
//! tier asks a chat backend for a JSON probability and coerces malformed
//! replies through a bounded repair loop. When both tiers fail the verdict is
//! `false`: an unclassifiable email is never treated as a pitch deck.
//!
//! # Architecture
//!
//! ```text
//! (subject, body) → normalize → Primary ──ok──► verdict
//!                                  │
//!                                 err
//!                                  ▼
//!                              Secondary → ScoreRepair → score ≥ threshold
//!                                  │
//!                                 err ──► false
//! ```
//!
//! # Example Usage
//!
//! ```
//! use deckscout_classifier::{ClassifierConfig, PitchDeckClassifier};
//! use deckscout_llm::{MockChatCompleter, MockTextGenerator};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let classifier = PitchDeckClassifier::new(
//!     MockTextGenerator::failing("offline"),
//!     MockChatCompleter::new(r#"{"probability": 82}"#),
//!     ClassifierConfig::default(),
//! );
//!
//! assert!(classifier.classify("Our seed deck", "Deck attached").await);
//! # });
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
pub mod normalize;
pub mod parser;
pub mod primary;
pub mod prompt;
pub mod repair;
pub mod secondary;


pub use classifier::{Classification, PitchDeckClassifier};
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use normalize::normalize;
pub use parser::{parse_score_reply, ScoreReply};
pub use primary::PrimaryClassifier;
pub use repair::{RepairOutcome, RepairState, ScoreRepair};
pub use secondary::SecondaryClassifier;
