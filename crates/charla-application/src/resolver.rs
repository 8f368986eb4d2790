//! Language resolution for one turn.

use charla_core::language::{Language, LanguageDetector};
use std::sync::Arc;

/// Resolves the working language of a turn.
///
/// An explicit preference is authoritative and skips detection entirely.
/// Otherwise the detection adapter is consulted; unsupported codes are
/// remapped to the default, and a failed detection degrades to the
/// default language with zero confidence.
pub struct LanguageResolver {
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageResolver {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self { detector }
    }

    /// Returns the resolved language and the detector's confidence in it.
    pub async fn resolve(&self, text: &str, explicit: Option<&str>) -> (Language, f32) {
        if let Some(code) = explicit.map(str::trim).filter(|code| !code.is_empty()) {
            return (Language::from_code_or_default(code), 1.0);
        }

        match self.detector.detect_language(text).await {
            Ok(detected) => {
                let language = Language::from_code_or_default(&detected.code);
                tracing::debug!(
                    raw = %detected.code,
                    resolved = %language,
                    confidence = detected.confidence,
                    "language detected"
                );
                (language, detected.confidence)
            }
            Err(err) => {
                tracing::warn!(%err, "language detection failed, using default");
                (Language::default(), 0.0)
            }
        }
    }
}
