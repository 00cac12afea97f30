//! Secondary tier: chat completion scored through the repair loop

use crate::classifier::Classification;
use crate::error::ClassifierError;
use crate::prompt::secondary_conversation;
use crate::repair::{RepairOutcome, ScoreRepair};
use deckscout_domain::traits::ChatCompleter;
use deckscout_domain::{ClassificationPolicy, Tier};
use tracing::{debug, info};

/// Classifies by asking a chat backend for a JSON probability
pub struct SecondaryClassifier<C: ChatCompleter> {
    completer: C,
    policy: ClassificationPolicy,
}

impl<C: ChatCompleter> SecondaryClassifier<C> {
    /// Create a secondary classifier over the given backend
    pub fn new(completer: C, policy: ClassificationPolicy) -> Self {
        Self { completer, policy }
    }

    /// Score the email, repairing malformed replies as needed
    ///
    /// # Errors
    ///
    /// Fails only when a backend call errors. Replies that never reach the
    /// expected shape resolve to a zero score, not an error.
    pub async fn score(&self, subject: &str, body: &str) -> Result<RepairOutcome, ClassifierError> {
        let reply = self
            .completer
            .complete(&secondary_conversation(subject, body))
            .await
            .map_err(|e| ClassifierError::Secondary(e.to_string()))?;
        debug!(reply = %reply, "Secondary backend replied");

        self.repair(reply).await
    }

    async fn repair(&self, raw: String) -> Result<RepairOutcome, ClassifierError> {
        ScoreRepair::new(&self.completer, self.policy.max_repair_attempts)
            .run(raw)
            .await
            .map_err(|e| ClassifierError::Secondary(format!("repair call failed: {}", e)))
    }

    /// Score the email and apply the threshold to the exact probability
    pub async fn classify(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<Classification, ClassifierError> {
        let outcome = self.score(subject, body).await?;
        let verdict = self.policy.is_positive(outcome.score);
        info!(
            score = outcome.score.probability(),
            repair_calls = outcome.repair_calls,
            exhausted = outcome.exhausted,
            verdict,
            "Analysed with secondary backend"
        );
        Ok(Classification {
            verdict,
            tier: Tier::Secondary,
            score: Some(outcome.score),
        })
    }
}
