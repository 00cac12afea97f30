//! Parse chat backend replies into probability scores

use deckscout_domain::ProbabilityScore;
use serde_json::Value;

/// What a secondary-tier reply turned out to contain
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreReply {
    /// A JSON object with a numeric `probability`
    Score(ProbabilityScore),

    /// Valid JSON, but no numeric `probability` in it
    NonNumeric(Value),

    /// Not JSON at all, or a bare `null`
    Unparseable,
}

/// Parse a chat reply expected to be `{"probability": x}`
pub fn parse_score_reply(raw: &str) -> ScoreReply {
    let json_str = extract_json(raw);

    // `null` has no fields to look up, so it is treated like prose
    let value: Value = match serde_json::from_str(json_str) {
        Ok(Value::Null) | Err(_) => return ScoreReply::Unparseable,
        Ok(value) => value,
    };

    match value.get("probability").and_then(Value::as_f64) {
        Some(probability) => ScoreReply::Score(ProbabilityScore::from_f64(probability)),
        None => ScoreReply::NonNumeric(value),
    }
}

/// Strip a markdown code fence if the model wrapped its JSON in one
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Skip the language tag line (```json) and the closing fence
        let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        return body.trim_end().trim_end_matches("```").trim();
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_integer_probability() {
        assert_eq!(
            parse_score_reply(r#"{"probability": 72}"#),
            ScoreReply::Score(ProbabilityScore::new(72))
        );
    }

    #[test]
    fn test_parse_float_probability_is_exact() {
        assert_eq!(
            parse_score_reply(r#"{ "probability": 59.5 }"#),
            ScoreReply::Score(ProbabilityScore::from_f64(59.5))
        );
        assert_ne!(
            parse_score_reply(r#"{ "probability": 59.99 }"#),
            ScoreReply::Score(ProbabilityScore::new(60))
        );
    }

    #[test]
    fn test_parse_with_markdown_wrapper() {
        let reply = "```json\n{\"probability\": 90}\n```";
        assert_eq!(
            parse_score_reply(reply),
            ScoreReply::Score(ProbabilityScore::new(90))
        );
    }

    #[test]
    fn test_parse_with_bare_fence() {
        let reply = "```\n{\"probability\": 10}\n```";
        assert_eq!(
            parse_score_reply(reply),
            ScoreReply::Score(ProbabilityScore::new(10))
        );
    }

    #[test]
    fn test_string_probability_is_non_numeric() {
        assert_eq!(
            parse_score_reply(r#"{"probability": "80"}"#),
            ScoreReply::NonNumeric(json!({"probability": "80"}))
        );
    }

    #[test]
    fn test_nested_probability_is_non_numeric() {
        let reply = r#"{"result": {"probability": 80}}"#;
        assert!(matches!(parse_score_reply(reply), ScoreReply::NonNumeric(_)));
    }

    #[test]
    fn test_bare_number_is_non_numeric() {
        assert_eq!(parse_score_reply("75"), ScoreReply::NonNumeric(json!(75)));
    }

    #[test]
    fn test_bare_string_is_non_numeric() {
        assert_eq!(
            parse_score_reply(r#""eighty""#),
            ScoreReply::NonNumeric(json!("eighty"))
        );
    }

    #[test]
    fn test_null_is_unparseable() {
        assert_eq!(parse_score_reply("null"), ScoreReply::Unparseable);
        assert_eq!(parse_score_reply("```json\nnull\n```"), ScoreReply::Unparseable);
    }

    #[test]
    fn test_prose_is_unparseable() {
        let reply = "The email very likely contains a pitch deck (around 80%).";
        assert_eq!(parse_score_reply(reply), ScoreReply::Unparseable);
    }

    #[test]
    fn test_empty_is_unparseable() {
        assert_eq!(parse_score_reply("   "), ScoreReply::Unparseable);
    }

    #[test]
    fn test_extract_json_plain() {
        assert_eq!(extract_json("  {\"a\": 1}\n"), "{\"a\": 1}");
    }
}
