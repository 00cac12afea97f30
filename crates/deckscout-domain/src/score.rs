//! Probability scores and the policy that turns them into verdicts

use serde::{Deserialize, Serialize};

/// Default score at or above which a message is taken to carry a pitch deck
pub const DEFAULT_THRESHOLD: u8 = 60;

/// Default bound on score repair attempts
pub const DEFAULT_MAX_REPAIR_ATTEMPTS: u32 = 5;

/// Probability (0-100) that a message carries a pitch deck
///
/// Holds the model-reported number as given, only clamped into range, so the
/// threshold sees exactly what the model said.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ProbabilityScore(f64);

impl ProbabilityScore {
    /// The fail-closed score
    pub const ZERO: Self = Self(0.0);

    /// Create a score from a whole percentage, clamping to 100
    pub fn new(value: u8) -> Self {
        Self(f64::from(value.min(100)))
    }

    /// Create a score from an arbitrary model-reported number
    ///
    /// Clamps into [0, 100] without rounding. NaN maps to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckscout_domain::ProbabilityScore;
    ///
    /// assert_eq!(ProbabilityScore::from_f64(59.5).probability(), 59.5);
    /// assert_eq!(ProbabilityScore::from_f64(250.0).probability(), 100.0);
    /// assert_eq!(ProbabilityScore::from_f64(-3.0), ProbabilityScore::ZERO);
    /// ```
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Exact probability in [0, 100]
    pub fn probability(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for ProbabilityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thresholds and bounds that govern classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationPolicy {
    /// Minimum score for a positive verdict
    pub threshold: u8,

    /// Attempt number at which score repair gives up with a zero score
    pub max_repair_attempts: u32,
}

impl ClassificationPolicy {
    /// Create a policy
    pub fn new(threshold: u8, max_repair_attempts: u32) -> Self {
        Self {
            threshold,
            max_repair_attempts,
        }
    }

    /// Whether a score is a positive verdict under this policy
    pub fn is_positive(&self, score: ProbabilityScore) -> bool {
        score.probability() >= f64::from(self.threshold)
    }
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MAX_REPAIR_ATTEMPTS)
    }
}
