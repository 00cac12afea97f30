//! Mailbox scanning: run the extractor over the newest messages

use crate::error::ExtractorError;
use crate::extractor::AttachmentExtractor;
use deckscout_domain::traits::{AttachmentStore, ChatCompleter, MailTransport, TextGenerator};
use deckscout_domain::ExtractionResult;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::info;

/// Outcome of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Messages looked at
    pub scanned: usize,

    /// Messages that yielded a result, paired with their id, in listing order
    pub extracted: Vec<(String, ExtractionResult)>,
}

impl ScanReport {
    /// Total attachments saved across all extracted messages
    pub fn attachments_saved(&self) -> usize {
        self.extracted.iter().map(|(_, r)| r.attachments.len()).sum()
    }
}

/// Runs an [`AttachmentExtractor`] over the newest messages of a mailbox
///
/// Messages are processed independently, up to `concurrency` at a time.
pub struct Scanner<T, S, G, C>
where
    T: MailTransport,
    S: AttachmentStore,
    G: TextGenerator,
    C: ChatCompleter,
{
    extractor: AttachmentExtractor<T, S, G, C>,
}

impl<T, S, G, C> Scanner<T, S, G, C>
where
    T: MailTransport,
    S: AttachmentStore,
    G: TextGenerator,
    C: ChatCompleter,
{
    /// Create a scanner around an extractor
    pub fn new(extractor: AttachmentExtractor<T, S, G, C>) -> Self {
        Self { extractor }
    }

    /// Scan the newest messages
    ///
    /// When `self_address` is `None`, the mailbox owner's address from the
    /// profile is used for the self-sent check.
    ///
    /// # Errors
    ///
    /// Fails only when the profile or the message listing cannot be fetched.
    /// Per-message failures are logged and leave the message out of the report.
    pub async fn scan(&self, self_address: Option<&str>) -> Result<ScanReport, ExtractorError> {
        let transport = self.extractor.transport();
        let config = self.extractor.config();

        let owner = match self_address {
            Some(address) => address.to_string(),
            None => {
                transport
                    .get_profile()
                    .await
                    .map_err(|e| ExtractorError::Transport(e.to_string()))?
                    .email_address
            }
        };

        let refs = transport
            .list_messages(config.max_results)
            .await
            .map_err(|e| ExtractorError::Transport(e.to_string()))?;
        let scanned = refs.len();
        info!(scanned, owner = %owner, "Scanning messages");

        let owner = owner.as_str();
        let extractor = &self.extractor;
        let mut extracted: Vec<(usize, String, ExtractionResult)> =
            stream::iter(refs.into_iter().enumerate())
                .map(|(index, message)| async move {
                    extractor
                        .extract(&message.id, owner)
                        .await
                        .map(|result| (index, message.id, result))
                })
                .buffer_unordered(config.concurrency.max(1))
                .filter_map(|outcome| async move { outcome })
                .collect()
                .await;
        extracted.sort_by_key(|(index, _, _)| *index);

        let report = ScanReport {
            scanned,
            extracted: extracted
                .into_iter()
                .map(|(_, id, result)| (id, result))
                .collect(),
        };
        info!(
            scanned,
            extracted = report.extracted.len(),
            attachments = report.attachments_saved(),
            "Scan complete"
        );
        Ok(report)
    }

    /// Extractor in use
    pub fn extractor(&self) -> &AttachmentExtractor<T, S, G, C> {
        &self.extractor
    }
}
