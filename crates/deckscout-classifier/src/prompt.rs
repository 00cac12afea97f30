//! Prompt construction for both classification tiers and the repair loop

use deckscout_domain::ChatMessage;
use serde_json::Value;

const JSON_SHAPE: &str = r#"{ "probability": x as number }"#;

const SECONDARY_INSTRUCTIONS: [&str; 4] = [
    "Understand what a pitch deck of a portfolio company or a startup is.",
    "I will feed you the subject line and the body of an email so you can decide whether a pitch deck file is attached to the email or not.",
    "Analyse both the subject line and the email body to find the presence of a pitch deck.",
    "Find the probability that a pitch deck is attached to the email.",
];

const NO_DESCRIPTION: &str =
    "Do not give a description, the JSON format output is mandatory.";

/// Build the single yes/no prompt for the primary tier
///
/// Subject and body are embedded verbatim.
pub fn primary_prompt(subject: &str, body: &str) -> String {
    format!(
        "I will feed you the subject and body of an email. Understand the context and tell me \
         whether the email is attached with a document called pitchdeck. Tell me yes if the email \
         is attached with a pitchdeck and no if the email is not attached with a pitchdeck. \
         The subject of the email is \"{}\" and the body of email is \"{}\".",
        subject, body
    )
}

/// Build the scoring conversation for the secondary tier
///
/// Context-setting system turns, then the subject and the body as separate
/// user turns.
pub fn secondary_conversation(subject: &str, body: &str) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = SECONDARY_INSTRUCTIONS
        .iter()
        .map(|s| ChatMessage::system(*s))
        .collect();

    messages.push(ChatMessage::system(format!(
        "Give the probability in a JSON format like {} on a scale of 0 to 100 where x is an \
         integer between 0 and 100. {} If you cannot determine the probability for any reason, \
         give the probability as 0 in the mentioned JSON format.",
        JSON_SHAPE, NO_DESCRIPTION
    )));
    messages.push(ChatMessage::user(format!("Email Subject :{}", subject)));
    messages.push(ChatMessage::user(format!("Email body:{} ", body)));
    messages
}

/// Build the repair conversation for a reply that parsed as JSON but lacked
/// a numeric `probability`
pub fn numeric_repair_conversation(parsed: &Value) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("I will give you a JSON value."),
        ChatMessage::system(format!(
            "Find the probability in it and give the probability exactly in a JSON format like \
             {} on a scale of 0 to 100 where x is an integer between 0 and 100.",
            JSON_SHAPE
        )),
        ChatMessage::system(NO_DESCRIPTION),
        ChatMessage::user(parsed.to_string()),
    ]
}

/// Build the repair conversation for a reply that was not JSON at all
pub fn rephrase_repair_conversation(raw: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("I will give you a description, rephrase it."),
        ChatMessage::system(
            "Understand the context and find the probability mentioned in the rephrased description.",
        ),
        ChatMessage::system(
            "If the description does not say anything about a probability, consider the probability as 0.",
        ),
        ChatMessage::system(format!(
            "Return the final probability in a JSON format like {} on a scale of 0 to 100 where x \
             is an integer between 0 and 100.",
            JSON_SHAPE
        )),
        ChatMessage::system(NO_DESCRIPTION),
        ChatMessage::user(raw),
    ]
}
