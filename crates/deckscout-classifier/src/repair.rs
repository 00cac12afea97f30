//! Score repair loop
//!
//! The chat backend is asked for `{"probability": x}` but does not always
//! comply. Instead of giving up on the first malformed reply, the repair loop
//! re-prompts the same backend to coerce its own output into shape:
//!
//! ```text
//!                 ┌──────────── numeric reply ───────────► Done(score)
//!                 │
//! AwaitingJson ───┼── JSON without a number ─► AwaitingNumericRepair ──┐
//!       ▲         │                                                    │ one call
//!       │         └── not JSON ──────────────► AwaitingRephraseRepair ─┤
//!       └──────────────────────── attempt + 1 ◄────────────────────────┘
//! ```
//!
//! Reaching `AwaitingJson` with `attempt >= max_attempts` ends the loop with a
//! zero score without inspecting the reply. Starting at attempt 1, the loop
//! therefore issues at most `max_attempts - 1` repair calls.

use crate::parser::{parse_score_reply, ScoreReply};
use crate::prompt::{numeric_repair_conversation, rephrase_repair_conversation};
use deckscout_domain::traits::ChatCompleter;
use deckscout_domain::ProbabilityScore;
use serde_json::Value;
use tracing::{debug, warn};

/// States of the repair loop
#[derive(Debug, Clone, PartialEq)]
pub enum RepairState {
    /// Holding a raw reply that has not been inspected yet
    AwaitingJson(String),

    /// Reply was JSON without a numeric probability; ask to extract one
    AwaitingNumericRepair(Value),

    /// Reply was prose; ask to rephrase it into the JSON shape
    AwaitingRephraseRepair(String),

    /// Finished with a score
    Done(ProbabilityScore),
}

/// Result of running the repair loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairOutcome {
    /// Final score (zero when the loop was exhausted)
    pub score: ProbabilityScore,

    /// Attempt number the loop finished on (1 = the initial reply was usable)
    pub attempts: u32,

    /// Number of backend calls issued by the loop itself
    pub repair_calls: u32,

    /// Whether the attempt bound was hit
    pub exhausted: bool,
}

/// Bounded, iterative score repair against a chat backend
pub struct ScoreRepair<'a, C: ChatCompleter> {
    completer: &'a C,
    max_attempts: u32,
}

impl<'a, C: ChatCompleter> ScoreRepair<'a, C> {
    /// Create a repair loop over the given backend
    pub fn new(completer: &'a C, max_attempts: u32) -> Self {
        Self {
            completer,
            max_attempts,
        }
    }

    /// Drive a raw reply to a score
    ///
    /// # Errors
    ///
    /// Returns the backend's error if a repair call fails.
    pub async fn run(&self, raw: impl Into<String>) -> Result<RepairOutcome, C::Error> {
        let mut attempt: u32 = 1;
        let mut repair_calls: u32 = 0;
        let mut exhausted = false;
        let mut state = RepairState::AwaitingJson(raw.into());

        loop {
            state = match state {
                RepairState::AwaitingJson(_) if attempt >= self.max_attempts => {
                    warn!(attempt, "Score repair exhausted, failing closed");
                    exhausted = true;
                    RepairState::Done(ProbabilityScore::ZERO)
                }
                RepairState::AwaitingJson(raw) => match parse_score_reply(&raw) {
                    ScoreReply::Score(score) => RepairState::Done(score),
                    ScoreReply::NonNumeric(value) => {
                        debug!(attempt, reply = %raw, "Reply lacks a numeric probability");
                        RepairState::AwaitingNumericRepair(value)
                    }
                    ScoreReply::Unparseable => {
                        debug!(attempt, reply = %raw, "Reply is not JSON");
                        RepairState::AwaitingRephraseRepair(raw)
                    }
                },
                RepairState::AwaitingNumericRepair(value) => {
                    let reply = self
                        .completer
                        .complete(&numeric_repair_conversation(&value))
                        .await?;
                    repair_calls += 1;
                    attempt += 1;
                    RepairState::AwaitingJson(reply)
                }
                RepairState::AwaitingRephraseRepair(raw) => {
                    let reply = self
                        .completer
                        .complete(&rephrase_repair_conversation(&raw))
                        .await?;
                    repair_calls += 1;
                    attempt += 1;
                    RepairState::AwaitingJson(reply)
                }
                RepairState::Done(score) => {
                    return Ok(RepairOutcome {
                        score,
                        attempts: attempt,
                        repair_calls,
                        exhausted,
                    });
                }
            };
        }
    }
}
