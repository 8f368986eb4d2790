//! Boundary contracts for one conversational turn.

use crate::intent::FALLBACK_INTENT;
use crate::language::Language;
use crate::sentiment::Sentiment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound turn request as dispatched by the transport front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub session_id: String,
    pub user_id: String,
    pub message_text: String,
    /// Explicit language preference; authoritative when present.
    #[serde(default)]
    pub language: Option<String>,
}

/// Whether a response carries a reply or reports a rejected turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Message,
    Error,
}

/// Outbound reply for one turn.
///
/// Every invocation returns one of these; failures degrade into a
/// well-formed response rather than propagating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub session_id: String,
    pub message: String,
    pub intent: String,
    pub sentiment: Sentiment,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

impl TurnResponse {
    /// A validation-failure response emitted before any pipeline stage runs.
    pub fn validation_error(
        session_id: impl Into<String>,
        message: impl Into<String>,
        language: Language,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: ResponseKind::Error,
            session_id: session_id.into(),
            message: message.into(),
            intent: FALLBACK_INTENT.to_string(),
            sentiment: Sentiment::Neutral,
            language,
            timestamp: now,
        }
    }
}
