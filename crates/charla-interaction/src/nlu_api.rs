//! NluApiClassifier - REST client for the NLU bot runtime.
//!
//! Sends pivot-language text to the bot's recognize-text endpoint and
//! normalizes the loosely-shaped session-state payload into a typed
//! `Recognition`.

use async_trait::async_trait;
use charla_core::error::{CharlaError, Result};
use charla_core::intent::{IntentClassifier, IntentState, Recognition, FALLBACK_INTENT};
use charla_core::language::Language;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

const SERVICE: &str = "nlu";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Intent classifier that talks to the NLU bot's HTTP runtime.
#[derive(Clone)]
pub struct NluApiClassifier {
    client: Client,
    base_url: String,
    bot_id: String,
    bot_alias_id: String,
    timeout: Duration,
}

impl NluApiClassifier {
    /// Creates a new classifier for the given bot.
    pub fn new(
        base_url: impl Into<String>,
        bot_id: impl Into<String>,
        bot_alias_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            bot_id: bot_id.into(),
            bot_alias_id: bot_alias_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn recognize_url(&self, locale_id: &str, session_id: &str) -> String {
        format!(
            "{}/bots/{}/aliases/{}/locales/{}/sessions/{}/text",
            self.base_url.trim_end_matches('/'),
            self.bot_id,
            self.bot_alias_id,
            locale_id,
            session_id
        )
    }

    /// Flattens the bot's session-state payload into a `Recognition`.
    ///
    /// A missing intent name degrades to the fallback sentinel with a
    /// Failed state; unparseable states do the same.
    fn normalize(response: RecognizeTextResponse) -> Recognition {
        let intent = response.session_state.and_then(|state| state.intent);

        let (intent_name, state, raw_slots) = match intent {
            Some(intent) => {
                let name = intent
                    .name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| FALLBACK_INTENT.to_string());
                let state = intent
                    .state
                    .as_deref()
                    .and_then(|value| value.parse::<IntentState>().ok())
                    .unwrap_or_default();
                (name, state, intent.slots)
            }
            None => (FALLBACK_INTENT.to_string(), IntentState::Failed, HashMap::new()),
        };

        let slots = raw_slots
            .into_iter()
            .filter_map(|(name, slot)| {
                let interpreted = slot?.value?.interpreted_value?;
                (!interpreted.is_empty()).then_some((name, interpreted))
            })
            .collect();

        let messages = response
            .messages
            .into_iter()
            .filter_map(|message| message.content)
            .filter(|content| !content.is_empty())
            .collect();

        Recognition {
            intent_name,
            state,
            slots,
            messages,
        }
    }
}

#[async_trait]
impl IntentClassifier for NluApiClassifier {
    async fn classify(
        &self,
        text: &str,
        language: Language,
        session_id: &str,
    ) -> Result<Recognition> {
        let url = self.recognize_url(language.locale_id(), session_id);
        let request = RecognizeTextRequest { text };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CharlaError::adapter(
                SERVICE,
                format!("recognize-text returned {}", response.status()),
            ));
        }

        let parsed: RecognizeTextResponse = response
            .json()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("invalid response: {err}")))?;

        let recognition = Self::normalize(parsed);
        tracing::debug!(
            intent = %recognition.intent_name,
            state = ?recognition.state,
            "NLU recognition for session {session_id}"
        );
        Ok(recognition)
    }
}

#[derive(Serialize)]
struct RecognizeTextRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeTextResponse {
    session_state: Option<SessionState>,
    #[serde(default)]
    messages: Vec<BotMessage>,
}

#[derive(Deserialize)]
struct SessionState {
    intent: Option<Intent>,
}

#[derive(Deserialize)]
struct Intent {
    name: Option<String>,
    state: Option<String>,
    #[serde(default)]
    slots: HashMap<String, Option<Slot>>,
}

#[derive(Deserialize)]
struct Slot {
    value: Option<SlotValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotValue {
    interpreted_value: Option<String>,
}

#[derive(Deserialize)]
struct BotMessage {
    content: Option<String>,
}
