//! Wiring of the production backends from configuration.

use crate::config::Config;
use crate::error::{CliError, Result};
use deckscout_classifier::PitchDeckClassifier;
use deckscout_extractor::AttachmentExtractor;
use deckscout_llm::{HuggingFaceProvider, OpenAiChatProvider};
use deckscout_mail::{DecoderConfig, FilesystemStore, GmailTransport, MessageDecoder};
use std::time::Duration;

/// Classifier over the hosted backends.
pub type LiveClassifier = PitchDeckClassifier<HuggingFaceProvider, OpenAiChatProvider>;

/// Extractor over the Gmail API, the filesystem and the hosted backends.
pub type LiveExtractor =
    AttachmentExtractor<GmailTransport, FilesystemStore, HuggingFaceProvider, OpenAiChatProvider>;

fn require<'a>(value: &'a Option<String>, what: &str, env: &str, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::MissingCredential(format!("{} (set {} or {})", what, env, key)))
}

/// Build the two-tier classifier.
pub fn build_classifier(config: &Config) -> Result<LiveClassifier> {
    let hf = &config.huggingface;
    let hf_token = require(
        &hf.access_token,
        "HuggingFace access token",
        "HUGGINGFACE_ACCESS_TOKEN",
        "[huggingface].access_token",
    )?;
    let primary = HuggingFaceProvider::with_endpoint(&hf.endpoint, hf_token, &hf.model)?
        .with_timeout(Duration::from_secs(hf.timeout_secs))?;

    let openai = &config.openai;
    let api_key = require(
        &openai.api_key,
        "OpenAI API key",
        "OPENAI_API_KEY",
        "[openai].api_key",
    )?;
    let secondary = OpenAiChatProvider::with_base_url(&openai.base_url, api_key, &openai.model)?
        .with_timeout(Duration::from_secs(openai.timeout_secs))?;

    PitchDeckClassifier::try_new(primary, secondary, config.classifier.clone())
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Build the message decoder.
pub fn build_decoder(config: &Config) -> Result<MessageDecoder> {
    Ok(MessageDecoder::new(DecoderConfig {
        quoted_domain: config.gmail.quoted_domain.clone(),
    })?)
}

/// Build the full extraction pipeline.
pub fn build_extractor(config: &Config) -> Result<LiveExtractor> {
    let token = require(
        &config.gmail.access_token,
        "Gmail access token",
        "GMAIL_ACCESS_TOKEN",
        "[gmail].access_token",
    )?;
    let transport = GmailTransport::with_base_url(&config.gmail.base_url, token)?;

    Ok(AttachmentExtractor::new(
        transport,
        FilesystemStore::new(&config.storage.attachments_dir),
        build_classifier(config)?,
        build_decoder(config)?,
        config.extractor.clone(),
    ))
}
