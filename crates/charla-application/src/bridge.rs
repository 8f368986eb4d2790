//! Pivot-language bridging.

use charla_core::language::Language;
use charla_core::translate::Translator;
use std::sync::Arc;

/// Bridges text to and from the pivot language.
///
/// Identity when source and target are the same language (no adapter call
/// is made). On adapter failure the original text is returned and the
/// pipeline continues in the original language: downstream components can
/// often still operate heuristically on untranslated text, so bridging
/// degrades rather than aborts.
pub struct BridgeTranslator {
    translator: Arc<dyn Translator>,
}

impl BridgeTranslator {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translates `text` from `source` to `target`, returning the input
    /// untouched on the pivot shortcut or on failure.
    pub async fn translate_or_original(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> String {
        if source == target {
            return text.to_string();
        }

        match self.translator.translate(text, source, target).await {
            Ok(translated) => translated,
            Err(err) => {
                tracing::warn!(%err, %source, %target, "translation failed, keeping original text");
                text.to_string()
            }
        }
    }
}
