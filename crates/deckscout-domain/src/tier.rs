//! Tier module - which stage of the fallback chain produced a verdict

use serde::{Deserialize, Serialize};

/// Classification tier
///
/// The classifier walks the tiers in order until one yields a usable answer:
/// - Primary: yes/no text-generation backend
/// - Secondary: chat backend scored through the repair loop
/// - FailClosed: neither backend produced a usable signal, verdict is negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Yes/no text generation
    Primary,

    /// Chat completion with a JSON probability
    Secondary,

    /// No usable signal
    FailClosed,
}

impl Tier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
            Tier::FailClosed => "fail_closed",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
