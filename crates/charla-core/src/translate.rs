//! Translation contract for bridging to and from the pivot language.

use crate::error::Result;
use crate::language::Language;

/// An abstract client for the translation engine.
///
/// Callers are expected to skip the call entirely when source and target
/// are the same language; implementations may assume they differ.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` from `source` to `target`.
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String>;
}
