//! Background worker for continuous mailbox scanning

use crate::metrics::ScanMetrics;
use crate::scanner::Scanner;
use crate::ExtractorError;
use deckscout_domain::traits::{AttachmentStore, ChatCompleter, MailTransport, TextGenerator};
use std::time::Instant;
use tokio::time::{interval, Duration};

/// Background worker that runs a [`Scanner`] on a schedule
///
/// # Examples
///
/// ```no_run
/// use deckscout_classifier::{ClassifierConfig, PitchDeckClassifier};
/// use deckscout_extractor::{AttachmentExtractor, ExtractorConfig, ScanWorker, Scanner};
/// use deckscout_llm::{HuggingFaceProvider, OpenAiChatProvider};
/// use deckscout_mail::{DecoderConfig, FilesystemStore, GmailTransport, MessageDecoder};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ExtractorConfig::default();
///     let extractor = AttachmentExtractor::new(
///         GmailTransport::new("ya29...")?,
///         FilesystemStore::default(),
///         PitchDeckClassifier::new(
///             HuggingFaceProvider::new("hf_...", "google/flan-t5-xxl")?,
///             OpenAiChatProvider::new("sk-...", "gpt-3.5-turbo")?,
///             ClassifierConfig::default(),
///         ),
///         MessageDecoder::new(DecoderConfig::default())?,
///         config.clone(),
///     );
///     let mut worker = ScanWorker::new(Scanner::new(extractor), config.poll_interval());
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run().await?;
///     Ok(())
/// }
/// ```
pub struct ScanWorker<T, S, G, C>
where
    T: MailTransport,
    S: AttachmentStore,
    G: TextGenerator,
    C: ChatCompleter,
{
    scanner: Scanner<T, S, G, C>,
    interval: Duration,
    self_address: Option<String>,
    metrics: ScanMetrics,
}

impl<T, S, G, C> ScanWorker<T, S, G, C>
where
    T: MailTransport,
    S: AttachmentStore,
    G: TextGenerator,
    C: ChatCompleter,
{
    /// Create a new background worker
    ///
    /// Intervals shorter than one second are raised to one second.
    pub fn new(scanner: Scanner<T, S, G, C>, interval: Duration) -> Self {
        Self {
            scanner,
            interval: interval.max(Duration::from_secs(1)),
            self_address: None,
            metrics: ScanMetrics::new(),
        }
    }

    /// Use a fixed address for the self-sent check instead of the profile's
    pub fn with_self_address(mut self, address: impl Into<String>) -> Self {
        self.self_address = Some(address.into());
        self
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed scan is logged and retried on the next tick.
    pub async fn run(&mut self) -> Result<(), ExtractorError> {
        let mut ticker = interval(self.interval);

        tracing::info!(interval = ?self.interval, "Scan worker started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.cycle().await {
                        tracing::error!(error = %e, "Scan failed");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping scan worker");
                    break;
                }
            }
        }

        tracing::info!("Scan worker stopped. Final metrics:\n{}", self.metrics.summary());
        Ok(())
    }

    /// Run for a specific number of cycles
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failed scan.
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<(), ExtractorError> {
        let mut ticker = interval(self.interval);

        tracing::info!(cycles, interval = ?self.interval, "Scan worker started");

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting scan {}/{}", cycle + 1, cycles);

            if let Err(e) = self.cycle().await {
                tracing::error!(error = %e, "Scan {}/{} failed", cycle + 1, cycles);
                return Err(e);
            }
        }

        tracing::info!(
            "Scan worker finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics.summary()
        );
        Ok(())
    }

    async fn cycle(&mut self) -> Result<(), ExtractorError> {
        let started = Instant::now();
        let result = self.scanner.scan(self.self_address.as_deref()).await;
        self.metrics.total_runtime_secs += started.elapsed().as_secs();

        match result {
            Ok(report) => {
                self.metrics.record_scan(&report);
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failure();
                Err(e)
            }
        }
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
