//! Sentiment labels and the sentiment analysis contract.

use crate::error::Result;
use crate::language::Language;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Emotional polarity of a user message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

/// Per-label confidence scores, summing to roughly one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
    pub mixed: f32,
}

/// Outcome of a sentiment analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub scores: SentimentScores,
}

impl SentimentResult {
    /// The degraded result used when the analyzer is unavailable:
    /// NEUTRAL with full confidence on the neutral score.
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            scores: SentimentScores {
                positive: 0.0,
                negative: 0.0,
                neutral: 1.0,
                mixed: 0.0,
            },
        }
    }
}

/// An abstract client for the sentiment analysis service.
///
/// Sentiment is scored on the raw, untranslated user text so the model
/// sees the user's own words.
#[async_trait::async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Scores the emotional polarity of `text` in the given language.
    async fn detect_sentiment(&self, text: &str, language: Language) -> Result<SentimentResult>;
}
