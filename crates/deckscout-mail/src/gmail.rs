//! Gmail REST transport
//!
//! Reads messages and attachments for the authenticated user. Obtaining and
//! refreshing the OAuth access token happens elsewhere; this transport only
//! presents it.

use crate::decoder::decode_base64url;
use crate::error::MailError;
use async_trait::async_trait;
use deckscout_domain::traits::MailTransport;
use deckscout_domain::{MailMessage, MailProfile, MessageRef};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Gmail API base for the authenticated user
pub const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Default timeout for mail API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Mail transport backed by the Gmail REST API
pub struct GmailTransport {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct AttachmentResponse {
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

impl GmailTransport {
    /// Create a transport against the public Gmail API
    pub fn new(access_token: impl Into<String>) -> Result<Self, MailError> {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Create a transport against a specific base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, MailError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, MailError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MailError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(%url, %status, "Mail API response received");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MailError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MailError::Decode(e.to_string()))
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, MailError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

#[async_trait]
impl MailTransport for GmailTransport {
    type Error = MailError;

    async fn get_message(&self, id: &str) -> Result<MailMessage, Self::Error> {
        self.get_json(&format!("messages/{}", id), &[]).await
    }

    async fn get_attachment(
        &self,
        attachment_id: &str,
        message_id: &str,
    ) -> Result<Vec<u8>, Self::Error> {
        let response: AttachmentResponse = self
            .get_json(
                &format!("messages/{}/attachments/{}", message_id, attachment_id),
                &[],
            )
            .await?;
        decode_base64url(&response.data)
    }

    async fn list_messages(&self, max_results: u32) -> Result<Vec<MessageRef>, Self::Error> {
        let response: ListResponse = self
            .get_json("messages", &[("maxResults", max_results.to_string())])
            .await?;
        Ok(response.messages)
    }

    async fn get_profile(&self) -> Result<MailProfile, Self::Error> {
        self.get_json("profile", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine as _;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn transport(server: &MockServer) -> GmailTransport {
        GmailTransport::with_base_url(server.uri(), "ya29.test").unwrap()
    }

    #[tokio::test]
    async fn test_get_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages/18c1"))
            .and(header("authorization", "Bearer ya29.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "18c1",
                "threadId": "18c0",
                "payload": {
                    "mimeType": "multipart/mixed",
                    "headers": [{"name": "Subject", "value": "Deck"}],
                    "parts": [
                        {"mimeType": "text/plain", "body": {"size": 2, "data": "aGk"}},
                        {"mimeType": "application/pdf", "filename": "deck.pdf",
                         "body": {"size": 10, "attachmentId": "att-1"}}
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let message = transport(&server).await.get_message("18c1").await.unwrap();
        assert_eq!(message.id, "18c1");
        assert_eq!(message.payload.parts.len(), 2);
        assert_eq!(message.payload.parts[1].attachment_id(), Some("att-1"));
    }

    #[tokio::test]
    async fn test_get_attachment_decodes_base64url() {
        let server = MockServer::start().await;
        let bytes: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0xfb, 0xff];
        Mock::given(method("GET"))
            .and(path("/messages/m1/attachments/att-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "size": bytes.len(),
                "data": URL_SAFE.encode(&bytes),
            })))
            .mount(&server)
            .await;

        let fetched = transport(&server)
            .await
            .get_attachment("att-1", "m1")
            .await
            .unwrap();
        assert_eq!(fetched, bytes);
    }

    #[tokio::test]
    async fn test_list_messages_passes_max_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages"))
            .and(query_param("maxResults", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [{"id": "a", "threadId": "t"}, {"id": "b", "threadId": "t"}],
                "resultSizeEstimate": 2
            })))
            .mount(&server)
            .await;

        let refs = transport(&server).await.list_messages(25).await.unwrap();
        let ids: Vec<&str> = refs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_mailbox_lists_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"resultSizeEstimate": 0})),
            )
            .mount(&server)
            .await;

        let refs = transport(&server).await.list_messages(10).await.unwrap();
        assert!(refs.is_empty());
    }

    #[tokio::test]
    async fn test_get_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "emailAddress": "partner@fund.vc",
                "messagesTotal": 1204,
                "threadsTotal": 800
            })))
            .mount(&server)
            .await;

        let profile = transport(&server).await.get_profile().await.unwrap();
        assert_eq!(profile.email_address, "partner@fund.vc");
        assert_eq!(profile.messages_total, 1204);
    }

    #[tokio::test]
    async fn test_missing_message_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = transport(&server).await.get_message("gone").await;
        assert!(matches!(result, Err(MailError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rejected_token_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_token"))
            .mount(&server)
            .await;

        let result = transport(&server).await.get_profile().await;
        match result {
            Err(MailError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid_token");
            }
            other => panic!("expected status error, got {:?}", other.map(|_| ())),
        }
    }
}
