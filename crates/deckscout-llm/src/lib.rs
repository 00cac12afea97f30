//! Deckscout LLM Provider Layer
//!
//! Inference backend implementations for the classification pipeline.
//!
//! # Architecture
//!
//! This crate provides implementations of the `TextGenerator` and
//! `ChatCompleter` traits from `deckscout-domain`. Each provider issues
//! exactly one HTTP request per call; retrying is the caller's decision.
//!
//! # Providers
//!
//! - `HuggingFaceProvider`: Hosted text-generation inference (primary tier)
//! - `OpenAiChatProvider`: Chat completions (secondary tier)
//! - `MockTextGenerator` / `MockChatCompleter`: Deterministic mocks for testing
//!
//! # Examples
//!
//! ```
//! use deckscout_llm::MockChatCompleter;
//! use deckscout_domain::{traits::ChatCompleter, ChatMessage};
//!
//! # tokio_test_block(async {
//! let provider = MockChatCompleter::new(r#"{"probability": 80}"#);
//! let reply = provider.complete(&[ChatMessage::user("hi")]).await.unwrap();
//! assert_eq!(reply, r#"{"probability": 80}"#);
//! assert_eq!(provider.call_count(), 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod huggingface;
pub mod openai;

use async_trait::async_trait;
use deckscout_domain::traits::{ChatCompleter, TextGenerator};
use deckscout_domain::ChatMessage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiChatProvider;

/// Default timeout for inference requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Communication(e.to_string())
        }
    }
}

/// Build the shared HTTP client used by the providers
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted replies shared by the mock providers
#[derive(Debug)]
struct Script<T> {
    default: Result<T, String>,
    queue: VecDeque<Result<T, String>>,
}

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Result<T, String> {
        self.queue.pop_front().unwrap_or_else(|| self.default.clone())
    }
}

/// Mock text-generation backend for deterministic testing
///
/// Replies are served from a queue first, then from a fixed default. The
/// call counter and the recorded inputs are shared between clones.
///
/// # Examples
///
/// ```
/// use deckscout_llm::MockTextGenerator;
/// use serde_json::json;
///
/// let provider = MockTextGenerator::answering("yes");
/// provider.push_response(json!({"error": "Model is loading"}));
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    script: Arc<Mutex<Script<serde_json::Value>>>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    /// Create a mock that returns the given payload for every call
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                default: Ok(response),
                queue: VecDeque::new(),
            })),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that generates the given text in the usual array shape
    pub fn answering(text: &str) -> Self {
        Self::new(serde_json::json!([{ "generated_text": text }]))
    }

    /// Create a mock whose every call fails with a communication error
    pub fn failing(reason: impl Into<String>) -> Self {
        let mock = Self::new(serde_json::Value::Null);
        lock(&mock.script).default = Err(reason.into());
        mock
    }

    /// Queue a payload to be returned before the default
    pub fn push_response(&self, response: serde_json::Value) {
        lock(&self.script).queue.push_back(Ok(response));
    }

    /// Queue a communication error to be returned before the default
    pub fn push_error(&self, reason: impl Into<String>) {
        lock(&self.script).queue.push_back(Err(reason.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.inputs).len()
    }

    /// Prompts received so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        lock(&self.inputs).clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    type Error = LlmError;

    async fn generate(&self, inputs: &str) -> Result<serde_json::Value, Self::Error> {
        lock(&self.inputs).push(inputs.to_string());
        lock(&self.script).next().map_err(LlmError::Communication)
    }
}

/// Mock chat backend for deterministic testing
///
/// Replies are served from a queue first, then from a fixed default. The
/// call counter and the recorded conversations are shared between clones.
#[derive(Debug, Clone)]
pub struct MockChatCompleter {
    script: Arc<Mutex<Script<String>>>,
    conversations: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockChatCompleter {
    /// Create a mock that returns the given reply for every call
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                default: Ok(reply.into()),
                queue: VecDeque::new(),
            })),
            conversations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose every call fails with a communication error
    pub fn failing(reason: impl Into<String>) -> Self {
        let mock = Self::new(String::new());
        lock(&mock.script).default = Err(reason.into());
        mock
    }

    /// Queue a reply to be returned before the default
    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.script).queue.push_back(Ok(reply.into()));
    }

    /// Queue a communication error to be returned before the default
    pub fn push_error(&self, reason: impl Into<String>) {
        lock(&self.script).queue.push_back(Err(reason.into()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.conversations).len()
    }

    /// Conversations received so far, in call order
    pub fn conversations(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.conversations).clone()
    }
}

#[async_trait]
impl ChatCompleter for MockChatCompleter {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error> {
        lock(&self.conversations).push(messages.to_vec());
        lock(&self.script).next().map_err(LlmError::Communication)
    }
}
