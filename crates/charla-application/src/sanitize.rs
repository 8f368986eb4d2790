//! Completion sanitization.
//!
//! Reasoning models sometimes hand back a thinking-out-loud transcript
//! instead of a direct answer. This module recovers a usable reply from a
//! raw completion: direct content wins, then an explicit response
//! declaration mined from the reasoning trace, then the trace's closing
//! sentence; whatever survives is cut at the first hallucinated dialogue
//! turn. Everything here is pure and deterministic.

use charla_core::generate::RawCompletion;
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered response-declaration patterns, grouped by language family.
/// Each requires an explicit colon so narrative phrases like
/// "I should say something" are not mistaken for declarations.
static DECLARATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // English: "I will respond: ...", "I'll reply: ...", "Let me say: ..."
        r#"(?i)(?:I will|I'll|I should|Let me)\s+(?:respond|reply|say)\s*:\s*["']?(.+?)["']?(?:\.|$)"#,
        // Spanish: "responderé: ...", "respondo: ...", "digo: ..."
        r#"(?i)(?:responderé|responder|respondo|digo)\s*:\s*["']?(.+?)["']?(?:\.|$)"#,
        // Portuguese: "vou responder: ...", "direi: ..."
        r#"(?i)(?:vou responder|respondo|direi)\s*:\s*["']?(.+?)["']?(?:\.|$)"#,
        // Bare label in any supported language
        r#"(?i)(?:response|respuesta|resposta)\s*:\s*["']?(.+?)["']?(?:\.|$)"#,
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("declaration pattern must compile"))
    .collect()
});

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern must compile"));

/// Sentence openers that mark thinking rather than an answer.
const HEDGE_PREFIXES: [&str; 4] = ["Okay", "Let me", "I should", "Maybe"];

/// Substrings that start a hallucinated next dialogue turn.
const DIALOGUE_MARKERS: [&str; 6] = ["User:", "Usuario:", "Cliente:", "Human:", "\n\nUser", "\n\nHuman"];

/// A closing sentence must be longer than this to count as an answer.
const MIN_REPLY_CHARS: usize = 20;

/// Recovers a usable reply from a raw completion.
///
/// Returns `None` when nothing recoverable remains; the caller substitutes
/// its localized acknowledgment.
pub fn recover_reply(completion: &RawCompletion) -> Option<String> {
    let reasoning = completion.reasoning.as_deref().unwrap_or("");

    let candidate = completion
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .or_else(|| declared_reply(reasoning))
        .or_else(|| closing_sentence(reasoning))
        .unwrap_or_default();

    let cleaned = truncate_dialogue(&candidate);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Scans the reasoning trace for an explicit response declaration.
fn declared_reply(reasoning: &str) -> Option<String> {
    if reasoning.is_empty() {
        return None;
    }
    DECLARATION_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(reasoning)
            .and_then(|captures| captures.get(1))
            .map(|answer| ensure_sentence(answer.as_str()))
    })
}

/// Falls back to the last sentence of the trace that reads like an answer:
/// long enough, and not opening with a hedge.
fn closing_sentence(reasoning: &str) -> Option<String> {
    if reasoning.is_empty() {
        return None;
    }
    let sentences: Vec<&str> = SENTENCE_BOUNDARY.split(reasoning).collect();
    sentences
        .iter()
        .rev()
        .map(|sentence| sentence.trim())
        .find(|sentence| {
            sentence.chars().count() > MIN_REPLY_CHARS
                && !HEDGE_PREFIXES
                    .iter()
                    .any(|prefix| sentence.starts_with(prefix))
        })
        .map(ensure_sentence)
}

/// Cuts the candidate at the first simulated dialogue turn.
fn truncate_dialogue(text: &str) -> String {
    let mut result = text;
    for marker in DIALOGUE_MARKERS {
        if let Some(index) = result.find(marker) {
            result = &result[..index];
        }
    }
    result.trim().to_string()
}

fn ensure_sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_reasoning(reasoning: &str) -> RawCompletion {
        RawCompletion {
            content: Some(String::new()),
            reasoning: Some(reasoning.to_string()),
        }
    }

    #[test]
    fn test_direct_content_wins() {
        let completion = RawCompletion {
            content: Some("Aceptamos devoluciones en 30 días.".to_string()),
            reasoning: Some("I will respond: something else.".to_string()),
        };
        assert_eq!(
            recover_reply(&completion).unwrap(),
            "Aceptamos devoluciones en 30 días."
        );
    }

    #[test]
    fn test_declared_reply_from_reasoning() {
        let completion = with_reasoning("I will respond: Hello there.");
        assert_eq!(recover_reply(&completion).unwrap(), "Hello there.");
    }

    #[test]
    fn test_declaration_pattern_table() {
        let cases = [
            ("I will respond: Hello there.", "Hello there."),
            ("Thinking it over. I'll reply: Gracias por tu compra.", "Gracias por tu compra."),
            ("Let me say: We ship worldwide.", "We ship worldwide."),
            ("Primero lo pienso. Luego respondo: El envío tarda 3-5 días.", "El envío tarda 3-5 días."),
            ("Creo que digo: Claro, con gusto te ayudo.", "Claro, con gusto te ayudo."),
            ("Pensando bem. Vou responder: Aceitamos devoluções em 30 dias.", "Aceitamos devoluções em 30 dias."),
            ("Response: The order ships tomorrow.", "The order ships tomorrow."),
            ("Mi respuesta: Los precios varían según el producto.", "Los precios varían según el producto."),
        ];
        for (reasoning, expected) in cases {
            assert_eq!(
                declared_reply(reasoning).as_deref(),
                Some(expected),
                "pattern failed for: {reasoning}"
            );
        }
    }

    #[test]
    fn test_narrative_phrases_are_not_declarations() {
        assert_eq!(declared_reply("Maybe I should say something helpful here"), None);
        assert_eq!(declared_reply("Let me think about how to reply to this"), None);
    }

    #[test]
    fn test_closing_sentence_skips_hedges() {
        let completion = with_reasoning(
            "Okay let me think. Maybe I should say something. The price varies by product and region.",
        );
        assert_eq!(
            recover_reply(&completion).unwrap(),
            "The price varies by product and region."
        );
    }

    #[test]
    fn test_closing_sentence_skips_short_fragments() {
        let completion =
            with_reasoning("Shipping policies here are generous for everyone involved. Got it. Yes.");
        assert_eq!(
            recover_reply(&completion).unwrap(),
            "Shipping policies here are generous for everyone involved."
        );
    }

    #[test]
    fn test_all_hedges_yields_nothing() {
        let completion = with_reasoning("Okay let me think about this for a while longer. Maybe something will come to me eventually.");
        assert_eq!(recover_reply(&completion), None);
    }

    #[test]
    fn test_dialogue_marker_truncation() {
        let completion = RawCompletion {
            content: Some("Great, here is my answer.\n\nUser: next question".to_string()),
            reasoning: None,
        };
        assert_eq!(recover_reply(&completion).unwrap(), "Great, here is my answer.");
    }

    #[test]
    fn test_spanish_dialogue_marker_truncation() {
        let completion = RawCompletion {
            content: Some("Con gusto te ayudo. Usuario: y el precio?".to_string()),
            reasoning: None,
        };
        assert_eq!(recover_reply(&completion).unwrap(), "Con gusto te ayudo.");
    }

    #[test]
    fn test_candidate_that_is_only_dialogue_yields_nothing() {
        let completion = RawCompletion {
            content: Some("User: hola\nAssistant: hola".to_string()),
            reasoning: None,
        };
        assert_eq!(recover_reply(&completion), None);
    }

    #[test]
    fn test_empty_completion_yields_nothing() {
        assert_eq!(recover_reply(&RawCompletion::default()), None);
        let blank = RawCompletion {
            content: Some("   ".to_string()),
            reasoning: Some(String::new()),
        };
        assert_eq!(recover_reply(&blank), None);
    }
}
