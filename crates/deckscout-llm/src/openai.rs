//! OpenAI Chat Provider
//!
//! Chat-completion backend used as the secondary classification tier.
//!
//! # Examples
//!
//! ```no_run
//! use deckscout_llm::OpenAiChatProvider;
//!
//! let provider = OpenAiChatProvider::new("sk-xxx", "gpt-3.5-turbo").unwrap();
//! ```

use crate::{http_client, LlmError, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use deckscout_domain::traits::ChatCompleter;
use deckscout_domain::ChatMessage;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat completions provider
pub struct OpenAiChatProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChatProvider {
    /// Create a new provider against the default base URL
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    /// Create a new provider against a specific base URL
    ///
    /// Useful for OpenAI-compatible gateways and for tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = http_client(timeout)?;
        Ok(self)
    }

    /// Model this provider queries
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompleter for OpenAiChatProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED => LlmError::Authentication(error_text),
                reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("No completion choices".to_string()))?;

        debug!(model = %self.model, reply_len = content.len(), "Chat completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    fn provider_for(server: &MockServer) -> OpenAiChatProvider {
        OpenAiChatProvider::with_base_url(server.uri(), "sk-test", DEFAULT_MODEL).unwrap()
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiChatProvider::new("sk", "gpt-4o").unwrap();
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model(), "gpt-4o");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "score it"},
                    {"role": "user", "content": "Email Subject :Deck"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion(r#"{"probability": 85}"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let reply = provider
            .complete(&[
                ChatMessage::system("score it"),
                ChatMessage::user("Email Subject :Deck"),
            ])
            .await
            .unwrap();
        assert_eq!(reply, r#"{"probability": 85}"#);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (401, "auth"),
            (404, "model"),
            (429, "rate"),
            (500, "comm"),
        ];

        for (status, kind) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = provider_for(&server)
                .complete(&[ChatMessage::user("x")])
                .await
                .unwrap_err();
            match (kind, err) {
                ("auth", LlmError::Authentication(_)) => {}
                ("model", LlmError::ModelNotAvailable(m)) => assert_eq!(m, DEFAULT_MODEL),
                ("rate", LlmError::RateLimitExceeded) => {}
                ("comm", LlmError::Communication(msg)) => assert!(msg.contains("500")),
                (kind, other) => panic!("Unexpected error for {}: {:?}", kind, other),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .complete(&[ChatMessage::user("x")])
            .await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }
}
