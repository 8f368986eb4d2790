//! Reply synthesis.
//!
//! Wraps the generative backend: a successful completion is sanitized
//! into a usable reply; a backend failure degrades to the deterministic
//! keyword-matched canned reply so the system keeps answering even when
//! generation is fully unavailable.

use charla_core::generate::ReplyGenerator;
use charla_core::language::Language;
use charla_core::message::{localized, MessageKey};
use std::sync::Arc;

use crate::canned::canned_reply;
use crate::sanitize::recover_reply;

/// A synthesized reply plus the language its text is written in.
///
/// Generated text comes back in the pivot language and still needs the
/// outbound bridge; localized fallbacks are already in the user's
/// language, so the bridge's identity shortcut leaves them untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedReply {
    pub text: String,
    pub language: Language,
}

/// Calls the generative backend and turns its completion into reply text.
pub struct ReplySynthesizer {
    generator: Arc<dyn ReplyGenerator>,
}

impl ReplySynthesizer {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { generator }
    }

    /// Synthesizes a reply to the raw user text given assembled context.
    ///
    /// Never fails: an unusable completion becomes the localized
    /// acknowledgment, an unreachable backend becomes a canned reply.
    pub async fn synthesize(
        &self,
        text: &str,
        context: &str,
        language: Language,
    ) -> SynthesizedReply {
        match self.generator.generate(text, context).await {
            Ok(completion) => match recover_reply(&completion) {
                Some(reply) => SynthesizedReply {
                    text: reply,
                    language: Language::PIVOT,
                },
                None => {
                    tracing::debug!("completion yielded no usable text, acknowledging");
                    SynthesizedReply {
                        text: localized(language, MessageKey::Acknowledgment).to_string(),
                        language,
                    }
                }
            },
            Err(err) => {
                tracing::warn!(%err, "generation unavailable, using canned reply");
                SynthesizedReply {
                    text: canned_reply(text, language).to_string(),
                    language,
                }
            }
        }
    }
}
