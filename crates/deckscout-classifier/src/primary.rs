//! Primary tier: yes/no text generation

use crate::error::ClassifierError;
use crate::prompt::primary_prompt;
use deckscout_domain::traits::TextGenerator;
use serde_json::Value;
use tracing::{debug, info};

/// Classifies with a single yes/no prompt against a text-generation backend
pub struct PrimaryClassifier<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> PrimaryClassifier<G> {
    /// Create a primary classifier over the given backend
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Ask the backend whether the email carries a pitch deck
    ///
    /// # Errors
    ///
    /// Fails when the backend call errors, when the payload is not an array
    /// of generations, or when the answer is anything but exactly `yes` or
    /// `no`.
    pub async fn classify(&self, subject: &str, body: &str) -> Result<bool, ClassifierError> {
        let prompt = primary_prompt(subject, body);
        debug!(prompt_len = prompt.len(), "Calling primary backend");

        let payload = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| ClassifierError::Primary(e.to_string()))?;

        let verdict = interpret_answer(&payload)?;
        info!(verdict, "Analysed with primary backend");
        Ok(verdict)
    }
}

/// Read the first generated text out of a payload and map it to a verdict
pub fn interpret_answer(payload: &Value) -> Result<bool, ClassifierError> {
    let generations = payload.as_array().ok_or_else(|| {
        ClassifierError::InvalidShape(format!("expected an array of generations, got {}", payload))
    })?;

    let answer = generations
        .first()
        .and_then(|g| g.get("generated_text"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ClassifierError::InvalidShape("first generation has no generated_text".to_string())
        })?;

    match answer {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(ClassifierError::UnexpectedAnswer(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckscout_llm::MockTextGenerator;
    use serde_json::json;

    #[test]
    fn test_interpret_yes_and_no() {
        assert!(interpret_answer(&json!([{"generated_text": "yes"}])).unwrap());
        assert!(!interpret_answer(&json!([{"generated_text": "no"}])).unwrap());
    }

    #[test]
    fn test_interpret_uses_first_generation() {
        let payload = json!([{"generated_text": "no"}, {"generated_text": "yes"}]);
        assert!(!interpret_answer(&payload).unwrap());
    }

    #[test]
    fn test_interpret_is_exact_match() {
        for answer in ["Yes", "yes.", " no", "maybe", ""] {
            let result = interpret_answer(&json!([{ "generated_text": answer }]));
            assert!(
                matches!(result, Err(ClassifierError::UnexpectedAnswer(_))),
                "{:?} should be rejected",
                answer
            );
        }
    }

    #[test]
    fn test_interpret_rejects_error_payload() {
        let result =
            interpret_answer(&json!({"error": "Model google/flan-t5-xxl is currently loading"}));
        assert!(matches!(result, Err(ClassifierError::InvalidShape(_))));
    }

    #[test]
    fn test_interpret_rejects_empty_array() {
        assert!(matches!(
            interpret_answer(&json!([])),
            Err(ClassifierError::InvalidShape(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_sends_prompt() {
        let generator = MockTextGenerator::answering("yes");
        let classifier = PrimaryClassifier::new(generator.clone());

        assert!(classifier.classify("Our deck", "Attached").await.unwrap());
        let inputs = generator.inputs();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].contains("\"Our deck\""));
    }

    #[tokio::test]
    async fn test_classify_transport_error() {
        let classifier = PrimaryClassifier::new(MockTextGenerator::failing("dns"));
        let result = classifier.classify("s", "b").await;
        assert!(matches!(result, Err(ClassifierError::Primary(_))));
    }
}
