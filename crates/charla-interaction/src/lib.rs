//! HTTP clients for the external language services.
//!
//! Each client wraps one collaborator behind the matching `charla-core`
//! trait: the NLU bot runtime, the text-analytics service (sentiment and
//! language detection), the translation engine, and the generative model
//! backend. Clients report failures as `CharlaError::Adapter`; degrading
//! to a stage fallback is the pipeline's decision, not theirs.

mod nlu_api;
mod reasoning_api;
mod text_analytics_api;
mod translate_api;

pub use nlu_api::NluApiClassifier;
pub use reasoning_api::ReasoningApiGenerator;
pub use text_analytics_api::TextAnalyticsClient;
pub use translate_api::TranslateApiClient;
