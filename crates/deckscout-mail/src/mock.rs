//! In-memory transport and store for deterministic testing

use crate::error::MailError;
use async_trait::async_trait;
use deckscout_domain::traits::{AttachmentStore, MailTransport};
use deckscout_domain::{AttachmentRecord, MailMessage, MailProfile, MessageRef};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct Mailbox {
    profile: Option<MailProfile>,
    messages: Vec<MailMessage>,
    attachments: HashMap<(String, String), Vec<u8>>,
    message_fetches: usize,
    attachment_fetches: usize,
}

/// Mail transport serving messages and attachments from memory
///
/// State is shared between clones, so a test can keep a handle for
/// inspecting fetch counts after handing a clone to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockMailTransport {
    mailbox: Arc<Mutex<Mailbox>>,
}

impl MockMailTransport {
    /// Create an empty mailbox owned by the given address
    pub fn new(owner: impl Into<String>) -> Self {
        let transport = Self::default();
        lock(&transport.mailbox).profile = Some(MailProfile {
            email_address: owner.into(),
            messages_total: 0,
        });
        transport
    }

    /// Add a message (listed newest first, in insertion order)
    pub fn add_message(&self, message: MailMessage) {
        let mut mailbox = lock(&self.mailbox);
        mailbox.messages.push(message);
        if let Some(profile) = mailbox.profile.as_mut() {
            profile.messages_total += 1;
        }
    }

    /// Add attachment bytes for a message
    pub fn add_attachment(&self, message_id: &str, attachment_id: &str, bytes: impl Into<Vec<u8>>) {
        lock(&self.mailbox).attachments.insert(
            (message_id.to_string(), attachment_id.to_string()),
            bytes.into(),
        );
    }

    /// Number of `get_message` calls served
    pub fn message_fetches(&self) -> usize {
        lock(&self.mailbox).message_fetches
    }

    /// Number of `get_attachment` calls served
    pub fn attachment_fetches(&self) -> usize {
        lock(&self.mailbox).attachment_fetches
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    type Error = MailError;

    async fn get_message(&self, id: &str) -> Result<MailMessage, Self::Error> {
        let mut mailbox = lock(&self.mailbox);
        mailbox.message_fetches += 1;
        mailbox
            .messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MailError::NotFound(format!("message {}", id)))
    }

    async fn get_attachment(
        &self,
        attachment_id: &str,
        message_id: &str,
    ) -> Result<Vec<u8>, Self::Error> {
        let mut mailbox = lock(&self.mailbox);
        mailbox.attachment_fetches += 1;
        mailbox
            .attachments
            .get(&(message_id.to_string(), attachment_id.to_string()))
            .cloned()
            .ok_or_else(|| MailError::NotFound(format!("attachment {}", attachment_id)))
    }

    async fn list_messages(&self, max_results: u32) -> Result<Vec<MessageRef>, Self::Error> {
        Ok(lock(&self.mailbox)
            .messages
            .iter()
            .take(max_results as usize)
            .map(|m| MessageRef {
                id: m.id.clone(),
                thread_id: m.thread_id.clone(),
            })
            .collect())
    }

    async fn get_profile(&self) -> Result<MailProfile, Self::Error> {
        lock(&self.mailbox)
            .profile
            .clone()
            .ok_or_else(|| MailError::NotFound("profile".to_string()))
    }
}

/// Attachment store that keeps records in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<AttachmentRecord>>>,
    fail_with: Option<String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every save fails
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            records: Arc::default(),
            fail_with: Some(reason.into()),
        }
    }

    /// Records saved so far, in save order
    pub fn records(&self) -> Vec<AttachmentRecord> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl AttachmentStore for MemoryStore {
    type Error = MailError;

    async fn save(&self, record: AttachmentRecord) -> Result<(), Self::Error> {
        if let Some(reason) = &self.fail_with {
            return Err(MailError::Io(std::io::Error::other(reason.clone())));
        }
        lock(&self.records).push(record);
        Ok(())
    }
}
