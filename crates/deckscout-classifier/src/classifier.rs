//! Classification orchestrator: primary, then secondary, then fail closed

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::normalize::normalize;
use crate::primary::PrimaryClassifier;
use crate::secondary::SecondaryClassifier;
use deckscout_domain::traits::{ChatCompleter, TextGenerator};
use deckscout_domain::{ProbabilityScore, Tier};
use tracing::{error, warn};

/// Verdict together with the tier that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Whether the message carries a pitch deck
    pub verdict: bool,

    /// Tier that produced the verdict
    pub tier: Tier,

    /// Score, when the secondary tier produced the verdict
    pub score: Option<ProbabilityScore>,
}

impl Classification {
    fn fail_closed() -> Self {
        Self {
            verdict: false,
            tier: Tier::FailClosed,
            score: None,
        }
    }
}

/// The pipeline's classification entry point
///
/// Sequences the primary tier, falls back to the secondary tier when the
/// primary fails, and fails closed when both do. Never returns an error.
pub struct PitchDeckClassifier<G, C>
where
    G: TextGenerator,
    C: ChatCompleter,
{
    primary: PrimaryClassifier<G>,
    secondary: SecondaryClassifier<C>,
    config: ClassifierConfig,
}

impl<G, C> PitchDeckClassifier<G, C>
where
    G: TextGenerator,
    C: ChatCompleter,
{
    /// Create a new classifier
    pub fn new(generator: G, completer: C, config: ClassifierConfig) -> Self {
        Self {
            primary: PrimaryClassifier::new(generator),
            secondary: SecondaryClassifier::new(completer, config.policy()),
            config,
        }
    }

    /// Create a classifier after validating its configuration
    pub fn try_new(
        generator: G,
        completer: C,
        config: ClassifierConfig,
    ) -> Result<Self, ClassifierError> {
        config.validate().map_err(ClassifierError::Config)?;
        Ok(Self::new(generator, completer, config))
    }

    /// Decide whether an email carries a pitch deck
    pub async fn classify(&self, subject: &str, body: &str) -> bool {
        self.classify_detailed(subject, body).await.verdict
    }

    /// Decide whether an email carries a pitch deck, reporting which tier decided
    pub async fn classify_detailed(&self, subject: &str, body: &str) -> Classification {
        let subject = normalize(subject);
        let body = self.truncate(normalize(body));

        match self.primary.classify(&subject, &body).await {
            Ok(verdict) => {
                return Classification {
                    verdict,
                    tier: Tier::Primary,
                    score: None,
                };
            }
            Err(e) => {
                warn!(error = %e, "Primary tier failed, falling back to secondary");
            }
        }

        match self.secondary.classify(&subject, &body).await {
            Ok(classification) => classification,
            Err(e) => {
                error!(error = %e, "Both classification tiers failed, treating as no pitch deck");
                Classification::fail_closed()
            }
        }
    }

    /// Configuration in force
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn truncate(&self, body: String) -> String {
        match self.config.max_body_chars {
            0 => body,
            max if body.chars().count() > max => body.chars().take(max).collect(),
            _ => body,
        }
    }
}
