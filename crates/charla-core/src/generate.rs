//! Generative backend contract.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Raw completion returned by the generative backend.
///
/// Reasoning-style models may answer in `content`, or think out loud in
/// `reasoning` and leave `content` empty; the reply synthesizer mines the
/// usable answer out of whichever is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCompletion {
    pub content: Option<String>,
    pub reasoning: Option<String>,
}

impl RawCompletion {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            reasoning: None,
        }
    }

    pub fn from_reasoning(reasoning: impl Into<String>) -> Self {
        Self {
            content: None,
            reasoning: Some(reasoning.into()),
        }
    }
}

/// An abstract client for the generative model backend.
#[async_trait::async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Requests a bounded-length completion for `prompt`, with `context`
    /// providing conversation history and steering hints.
    async fn generate(&self, prompt: &str, context: &str) -> Result<RawCompletion>;
}
