//! Deckscout Extractor
//!
//! Finds pitch decks in a mailbox and saves their attachments.
//!
//! # Overview
//!
//! - **Extraction**: one message at a time, with a cheap layout pre-filter
//!   ahead of classification so messages without attachments cost no
//!   inference
//! - **Scanning**: the newest messages of a mailbox, processed concurrently
//! - **Watching**: scans on a fixed interval until Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! MailTransport → Scanner → AttachmentExtractor → MessageDecoder
//!                                   │                    │
//!                                   │           PitchDeckClassifier
//!                                   ▼
//!                        FileNamer → AttachmentStore
//! ```
//!
//! # Usage
//!
//! ```
//! use deckscout_classifier::{ClassifierConfig, PitchDeckClassifier};
//! use deckscout_extractor::{AttachmentExtractor, ExtractorConfig, Scanner};
//! use deckscout_llm::{MockChatCompleter, MockTextGenerator};
//! use deckscout_mail::{DecoderConfig, MemoryStore, MessageDecoder, MockMailTransport};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let extractor = AttachmentExtractor::new(
//!     MockMailTransport::new("partner@fund.vc"),
//!     MemoryStore::new(),
//!     PitchDeckClassifier::new(
//!         MockTextGenerator::answering("no"),
//!         MockChatCompleter::new("{}"),
//!         ClassifierConfig::default(),
//!     ),
//!     MessageDecoder::new(DecoderConfig::default()).unwrap(),
//!     ExtractorConfig::default(),
//! );
//!
//! let report = Scanner::new(extractor).scan(None).await.unwrap();
//! assert_eq!(report.scanned, 0);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod metrics;
mod scanner;
mod worker;

pub use config::{AttachmentLayout, ExtractorConfig, MAX_RESULTS_LIMIT};
pub use error::ExtractorError;
pub use extractor::AttachmentExtractor;
pub use metrics::ScanMetrics;
pub use scanner::{ScanReport, Scanner};
pub use worker::ScanWorker;
