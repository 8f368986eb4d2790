//! Intent classification results and the classifier contract.

use crate::error::Result;
use crate::language::Language;
use crate::message::{localized, MessageKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// Reserved intent name used whenever classification is unresolved or failed.
pub const FALLBACK_INTENT: &str = "FallbackIntent";

/// Dialog state reported by the NLU bot for the matched intent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum IntentState {
    Fulfilled,
    InProgress,
    ReadyForFulfillment,
    #[default]
    Failed,
}

/// Normalized result of an intent classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recognition {
    pub intent_name: String,
    pub state: IntentState,
    /// Interpreted slot values keyed by slot name.
    pub slots: HashMap<String, String>,
    /// Messages the bot attached to the recognition, if any.
    pub messages: Vec<String>,
}

impl Recognition {
    /// The degraded recognition used when the classifier is unavailable:
    /// the fallback sentinel, Failed state, and a localized generic error.
    pub fn fallback(language: Language) -> Self {
        Self {
            intent_name: FALLBACK_INTENT.to_string(),
            state: IntentState::Failed,
            slots: HashMap::new(),
            messages: vec![localized(language, MessageKey::GenericError).to_string()],
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.intent_name == FALLBACK_INTENT
    }
}

/// An abstract client for the external NLU intent classifier.
///
/// The classifier receives pivot-language text; the locale it is invoked
/// with derives from the turn's resolved language.
#[async_trait::async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifies `text` within the given session.
    ///
    /// # Arguments
    ///
    /// * `text` - Pivot-language user text
    /// * `language` - Resolved turn language (determines the bot locale)
    /// * `session_id` - Conversation session the utterance belongs to
    async fn classify(
        &self,
        text: &str,
        language: Language,
        session_id: &str,
    ) -> Result<Recognition>;
}
