//! The turn orchestration pipeline.
//!
//! One inbound utterance becomes one outbound reply: resolve the working
//! language, bridge to the pivot language, classify intent, score
//! sentiment, assemble generation context from session history,
//! synthesize and sanitize a reply, bridge back, persist the turn. Every
//! stage degrades on its own; no failure escapes `handle_turn`.

pub mod bridge;
pub mod canned;
pub mod context;
pub mod logger;
pub mod orchestrator;
pub mod resolver;
pub mod sanitize;
pub mod synthesizer;

pub use orchestrator::TurnOrchestrator;
