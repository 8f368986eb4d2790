//! Supported languages and the language detection contract.
//!
//! The bot operates on a closed language set with Spanish as the pivot:
//! all text is normalized to Spanish before intent classification, and
//! unsupported detections are remapped to the default.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A language the bot can hold a conversation in.
///
/// Spanish doubles as the pivot language for the intent classifier,
/// which only understands one locale family.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
}

impl Language {
    /// The pivot language all classifier input is normalized to.
    pub const PIVOT: Language = Language::Es;

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// Locale identifier expected by the NLU bot.
    pub fn locale_id(&self) -> &'static str {
        match self {
            Language::Es => "es_ES",
            Language::En => "en_US",
            Language::Pt => "pt_BR",
        }
    }

    /// English name of the language, used in generation directives.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::Es => "Spanish",
            Language::En => "English",
            Language::Pt => "Portuguese",
        }
    }

    /// Parses a language code, tolerating region subtags ("pt-BR", "en_US")
    /// and case. Returns `None` for codes outside the supported set.
    pub fn from_code(code: &str) -> Option<Language> {
        let base = code
            .split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();
        match base.as_str() {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            "pt" => Some(Language::Pt),
            _ => None,
        }
    }

    /// Maps an arbitrary detected code into the supported set,
    /// falling back to the default language.
    pub fn from_code_or_default(code: &str) -> Language {
        Self::from_code(code).unwrap_or_default()
    }
}

/// Result of a language detection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// Raw language code as reported by the detector (may be unsupported).
    pub code: String,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f32,
}

/// An abstract client for the language detection service.
///
/// Implementations wrap the external detection backend; the caller decides
/// how to degrade when a call fails.
#[async_trait::async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Detects the dominant language of `text`.
    async fn detect_language(&self, text: &str) -> Result<DetectedLanguage>;
}
