//! Attachment extraction for a single message

use crate::config::{AttachmentLayout, ExtractorConfig};
use crate::error::ExtractorError;
use deckscout_classifier::PitchDeckClassifier;
use deckscout_domain::traits::{AttachmentStore, ChatCompleter, MailTransport, TextGenerator};
use deckscout_domain::{AttachmentRecord, ExtractionResult, MailPart};
use deckscout_mail::{FileNamer, MessageDecoder};
use tracing::{debug, error, info, warn};

/// Pulls pitch-deck attachments out of messages
///
/// For each message:
/// 1. Cheap pre-filter on the part layout (no inference spent on messages
///    without an attachment)
/// 2. Decode, then skip messages with no sender or sent from the mailbox
///    itself
/// 3. Classify; stop on a negative verdict
/// 4. Fetch, name and store each attachment part in order
///
/// # Examples
///
/// ```
/// use deckscout_classifier::{ClassifierConfig, PitchDeckClassifier};
/// use deckscout_extractor::{AttachmentExtractor, ExtractorConfig};
/// use deckscout_llm::{MockChatCompleter, MockTextGenerator};
/// use deckscout_mail::{DecoderConfig, MemoryStore, MessageDecoder, MockMailTransport};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let extractor = AttachmentExtractor::new(
///     MockMailTransport::new("partner@fund.vc"),
///     MemoryStore::new(),
///     PitchDeckClassifier::new(
///         MockTextGenerator::answering("yes"),
///         MockChatCompleter::new("{}"),
///         ClassifierConfig::default(),
///     ),
///     MessageDecoder::new(DecoderConfig::default()).unwrap(),
///     ExtractorConfig::default(),
/// );
///
/// // Unknown message: logged and treated as nothing to extract
/// assert!(extractor.extract("missing", "partner@fund.vc").await.is_none());
/// # });
/// ```
pub struct AttachmentExtractor<T, S, G, C>
where
    T: MailTransport,
    S: AttachmentStore,
    G: TextGenerator,
    C: ChatCompleter,
{
    transport: T,
    store: S,
    classifier: PitchDeckClassifier<G, C>,
    decoder: MessageDecoder,
    namer: FileNamer,
    config: ExtractorConfig,
}

impl<T, S, G, C> AttachmentExtractor<T, S, G, C>
where
    T: MailTransport,
    S: AttachmentStore,
    G: TextGenerator,
    C: ChatCompleter,
{
    /// Create a new extractor
    pub fn new(
        transport: T,
        store: S,
        classifier: PitchDeckClassifier<G, C>,
        decoder: MessageDecoder,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            transport,
            store,
            classifier,
            decoder,
            namer: FileNamer::new(),
            config,
        }
    }

    /// Extract attachments from a message, if it carries a pitch deck
    ///
    /// Never fails: transport and storage errors are logged and yield
    /// `None`, the same as a message that does not qualify.
    pub async fn extract(&self, message_id: &str, self_address: &str) -> Option<ExtractionResult> {
        match self.try_extract(message_id, self_address).await {
            Ok(result) => result,
            Err(e) => {
                error!(message_id, error = %e, "Extraction failed");
                None
            }
        }
    }

    /// Extract attachments from a message, reporting why it failed
    ///
    /// `Ok(None)` means the message does not qualify: wrong part layout,
    /// no sender, sent from `self_address`, or classified as no pitch deck.
    /// An empty `self_address` disables the self-sent check.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the message or an attachment fails, or
    /// if an attachment cannot be stored. Attachments stored before the
    /// failure stay stored.
    pub async fn try_extract(
        &self,
        message_id: &str,
        self_address: &str,
    ) -> Result<Option<ExtractionResult>, ExtractorError> {
        let message = self
            .transport
            .get_message(message_id)
            .await
            .map_err(|e| ExtractorError::Transport(e.to_string()))?;

        let Some(candidates) = self.attachment_parts(&message.payload) else {
            debug!(message_id, "No attachment part, skipping");
            return Ok(None);
        };

        let email = self.decoder.decode_message(&message);
        if email.from_email.is_empty() || email.is_from(self_address) {
            debug!(message_id, from = %email.from_email, "No sender or sent from self, skipping");
            return Ok(None);
        }

        if !self.classifier.classify(&email.subject, &email.body).await {
            debug!(message_id, "No pitch deck");
            return Ok(None);
        }
        info!(message_id, subject = %email.subject, "Pitch deck found");

        let mut attachments = Vec::with_capacity(candidates.len());
        for part in candidates {
            let Some(attachment_id) = part.attachment_id() else {
                warn!(message_id, part_id = %part.part_id, "Part has no attachment id, skipping");
                continue;
            };

            let bytes = self
                .transport
                .get_attachment(attachment_id, message_id)
                .await
                .map_err(|e| ExtractorError::Transport(e.to_string()))?;

            let generated_file_name = self.namer.name(&part.filename);
            self.store
                .save(AttachmentRecord {
                    generated_file_name: generated_file_name.clone(),
                    source_file_name: part.filename.clone(),
                    bytes,
                })
                .await
                .map_err(|e| ExtractorError::Storage(e.to_string()))?;

            attachments.push(generated_file_name);
        }

        Ok(Some(ExtractionResult {
            subject: email.subject,
            body: email.body,
            attachments,
            from: email.from_email,
        }))
    }

    /// Parts to fetch, or `None` when the message fails the layout check
    fn attachment_parts<'m>(&self, payload: &'m MailPart) -> Option<Vec<&'m MailPart>> {
        let parts = &payload.parts;

        match self.config.attachment_layout {
            AttachmentLayout::Positional => {
                parts.get(1)?.attachment_id()?;
                Some(parts.iter().skip(1).collect())
            }
            AttachmentLayout::AnyPart => {
                let found: Vec<&MailPart> =
                    parts.iter().filter(|p| p.attachment_id().is_some()).collect();
                (!found.is_empty()).then_some(found)
            }
        }
    }

    /// Mail transport in use
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Configuration in force
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckscout_classifier::ClassifierConfig;
    use deckscout_domain::{Header, MailBody, MailMessage};
    use deckscout_llm::{MockChatCompleter, MockTextGenerator};
    use deckscout_mail::{DecoderConfig, MemoryStore, MockMailTransport};

    type TestExtractor =
        AttachmentExtractor<MockMailTransport, MemoryStore, MockTextGenerator, MockChatCompleter>;

    fn attachment(id: &str, filename: &str) -> MailPart {
        MailPart {
            mime_type: "application/pdf".to_string(),
            filename: filename.to_string(),
            body: Some(MailBody {
                size: 100,
                data: None,
                attachment_id: Some(id.to_string()),
            }),
            ..Default::default()
        }
    }

    fn inline_image() -> MailPart {
        MailPart {
            mime_type: "image/png".to_string(),
            body: Some(MailBody {
                size: 10,
                data: Some("iVBO".to_string()),
                attachment_id: None,
            }),
            ..Default::default()
        }
    }

    fn message(id: &str, parts: Vec<MailPart>) -> MailMessage {
        MailMessage {
            id: id.to_string(),
            thread_id: id.to_string(),
            payload: MailPart {
                mime_type: "multipart/mixed".to_string(),
                headers: vec![
                    Header::new("From", "Founder <founder@startup.io>"),
                    Header::new("Subject", "Deck"),
                ],
                parts,
                ..Default::default()
            },
        }
    }

    fn extractor(
        transport: &MockMailTransport,
        store: &MemoryStore,
        config: ExtractorConfig,
    ) -> TestExtractor {
        AttachmentExtractor::new(
            transport.clone(),
            store.clone(),
            PitchDeckClassifier::new(
                MockTextGenerator::answering("yes"),
                MockChatCompleter::new("{}"),
                ClassifierConfig::default(),
            ),
            MessageDecoder::new(DecoderConfig::default()).unwrap(),
            config,
        )
    }

    #[tokio::test]
    async fn test_positional_requires_attachment_at_index_one() {
        let transport = MockMailTransport::new("me@fund.vc");
        transport.add_message(message(
            "m1",
            vec![MailPart::default(), inline_image(), attachment("a", "deck.pdf")],
        ));
        let store = MemoryStore::new();

        let result = extractor(&transport, &store, ExtractorConfig::default())
            .try_extract("m1", "me@fund.vc")
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(transport.attachment_fetches(), 0);
    }

    #[tokio::test]
    async fn test_any_part_finds_later_attachment() {
        let transport = MockMailTransport::new("me@fund.vc");
        transport.add_message(message(
            "m1",
            vec![MailPart::default(), inline_image(), attachment("a", "deck.pdf")],
        ));
        transport.add_attachment("m1", "a", b"%PDF".to_vec());
        let store = MemoryStore::new();
        let config = ExtractorConfig {
            attachment_layout: AttachmentLayout::AnyPart,
            ..Default::default()
        };

        let result = extractor(&transport, &store, config)
            .try_extract("m1", "me@fund.vc")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.attachments.len(), 1);
        assert_eq!(transport.attachment_fetches(), 1);
        assert_eq!(store.records()[0].source_file_name, "deck.pdf");
    }

    #[tokio::test]
    async fn test_parts_without_attachment_id_are_skipped() {
        let transport = MockMailTransport::new("me@fund.vc");
        transport.add_message(message(
            "m1",
            vec![
                MailPart::default(),
                attachment("a", "deck.pdf"),
                inline_image(),
                attachment("b", "financials.xlsx"),
            ],
        ));
        transport.add_attachment("m1", "a", b"deck".to_vec());
        transport.add_attachment("m1", "b", b"numbers".to_vec());
        let store = MemoryStore::new();

        let result = extractor(&transport, &store, ExtractorConfig::default())
            .try_extract("m1", "me@fund.vc")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.attachments.len(), 2);
        assert!(result.attachments[0].starts_with("deck"));
        assert!(result.attachments[1].ends_with(".xlsx"));
        assert_eq!(transport.attachment_fetches(), 2);
    }

    #[tokio::test]
    async fn test_missing_attachment_is_transport_error() {
        let transport = MockMailTransport::new("me@fund.vc");
        transport.add_message(message(
            "m1",
            vec![MailPart::default(), attachment("a", "deck.pdf")],
        ));
        let store = MemoryStore::new();
        let extractor = extractor(&transport, &store, ExtractorConfig::default());

        let result = extractor.try_extract("m1", "me@fund.vc").await;
        assert!(matches!(result, Err(ExtractorError::Transport(_))));
        assert!(extractor.extract("m1", "me@fund.vc").await.is_none());
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_storage_error() {
        let transport = MockMailTransport::new("me@fund.vc");
        transport.add_message(message(
            "m1",
            vec![MailPart::default(), attachment("a", "deck.pdf")],
        ));
        transport.add_attachment("m1", "a", b"deck".to_vec());
        let store = MemoryStore::failing("disk full");

        let result = extractor(&transport, &store, ExtractorConfig::default())
            .try_extract("m1", "me@fund.vc")
            .await;
        assert!(matches!(result, Err(ExtractorError::Storage(_))));
    }
}
