//! HuggingFace Inference Provider
//!
//! Text-generation backend used as the primary classification tier.
//!
//! The hosted inference API answers a successful generation with an array of
//! `{"generated_text": ...}` objects and anything else (model loading, quota,
//! bad token) with an object of its own shape. This provider hands back
//! whatever JSON it received so the caller can tell the two apart.
//!
//! # Examples
//!
//! ```no_run
//! use deckscout_llm::HuggingFaceProvider;
//!
//! let provider = HuggingFaceProvider::new("hf_xxx", "google/flan-t5-xxl").unwrap();
//! ```

use crate::{http_client, LlmError, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use deckscout_domain::traits::TextGenerator;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default HuggingFace inference endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Default text-generation model
pub const DEFAULT_MODEL: &str = "google/flan-t5-xxl";

/// HuggingFace hosted inference provider
pub struct HuggingFaceProvider {
    endpoint: String,
    model: String,
    access_token: String,
    client: reqwest::Client,
}

/// Request body for the inference API
#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

impl HuggingFaceProvider {
    /// Create a new provider against the default endpoint
    ///
    /// # Parameters
    ///
    /// - `access_token`: Bearer token for the inference API
    /// - `model`: Model repository id (e.g., "google/flan-t5-xxl")
    pub fn new(
        access_token: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, access_token, model)
    }

    /// Create a new provider against a specific endpoint
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            access_token: access_token.into(),
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

    fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceProvider {
    type Error = LlmError;

    async fn generate(&self, inputs: &str) -> Result<serde_json::Value, Self::Error> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.access_token)
            .json(&InferenceRequest { inputs })
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await?;
        debug!(model = %self.model, %status, "HuggingFace response received");

        serde_json::from_str(&text).map_err(|e| {
            LlmError::InvalidResponse(format!("HTTP {}: body is not JSON: {}", status, e))
        })
    }
}
