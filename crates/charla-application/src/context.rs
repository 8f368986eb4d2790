//! Generation context assembly.
//!
//! Builds the single prompt-context string fed to the generative backend:
//! recent history as alternating user/assistant lines, an intent hint, a
//! sentiment hint for charged turns, and the language directive. Absent
//! sections are omitted entirely, no empty lines are emitted.

use charla_core::history::HistoryRecord;
use charla_core::intent::Recognition;
use charla_core::language::Language;
use charla_core::sentiment::Sentiment;

/// Assembles generation context for one turn.
pub struct ContextAssembler {
    /// Maximum number of prior turns included.
    window: usize,
}

impl ContextAssembler {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Builds the context string. `history` must already be in
    /// chronological (oldest-first) order.
    pub fn assemble(
        &self,
        recognition: &Recognition,
        sentiment: Sentiment,
        language: Language,
        history: &[HistoryRecord],
    ) -> String {
        let mut lines = Vec::new();

        let skip = history.len().saturating_sub(self.window);
        for record in &history[skip..] {
            if !record.user_message.is_empty() {
                lines.push(format!("User: {}", record.user_message));
            }
            if !record.bot_reply.is_empty() {
                lines.push(format!("Assistant: {}", record.bot_reply));
            }
        }

        if let Some(hint) = intent_hint(&recognition.intent_name) {
            lines.push(hint.to_string());
        }

        if let Some(hint) = sentiment_hint(sentiment) {
            lines.push(hint.to_string());
        }

        lines.push(language_directive(language));

        lines.join("\n")
    }
}

/// Static steering hints keyed by intent name. Unknown intents (including
/// the fallback sentinel) fall through silently.
fn intent_hint(intent_name: &str) -> Option<&'static str> {
    match intent_name {
        "GreetingIntent" => Some("The user is opening the conversation; greet them back warmly."),
        "FarewellIntent" => Some("The user is wrapping up; close politely and offer further help."),
        "HelpIntent" => Some("The user wants to know what you can do; mention the main support topics."),
        "PriceQueryIntent" => Some("The user is asking about prices; ask which product they mean if unclear."),
        "ShippingQueryIntent" => Some("The user is asking about shipping; mention delivery times."),
        "ReturnQueryIntent" => Some("The user is asking about returns; mention the 30-day policy."),
        "FAQQueryIntent" => Some("The user wants factual store information; answer concisely."),
        "FeedbackIntent" => Some("The user is giving feedback; thank them for it."),
        _ => None,
    }
}

/// Tone hints for emotionally charged turns only.
fn sentiment_hint(sentiment: Sentiment) -> Option<&'static str> {
    match sentiment {
        Sentiment::Positive => Some("The user sounds pleased; keep the tone upbeat."),
        Sentiment::Negative => {
            Some("The user sounds upset; acknowledge the frustration and be reassuring.")
        }
        Sentiment::Neutral | Sentiment::Mixed => None,
    }
}

/// Names the language the final reply will reach the user in. Generation
/// itself stays in the pivot language; the outbound bridge carries the
/// reply the rest of the way.
fn language_directive(language: Language) -> String {
    match language {
        Language::Es => "Answer in Spanish.".to_string(),
        other => format!(
            "Answer in Spanish; the reply will be translated to {} for the user.",
            other.english_name()
        ),
    }
}
