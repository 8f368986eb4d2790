//! Keyword-bucket canned replies.
//!
//! The last line of defense when the generative backend is unavailable:
//! a deterministic match of the raw user text against topic buckets,
//! answered from the localized message table. Keyword lists cover the
//! three supported languages; matching is ordered, first bucket wins.

use charla_core::language::Language;
use charla_core::message::{localized, MessageKey};

/// Ordered topic buckets with their trigger keywords.
const BUCKETS: &[(MessageKey, &[&str])] = &[
    (
        MessageKey::CannedGreeting,
        &["hola", "buenos dias", "buenas", "hello", "hey", "good morning", "olá", "bom dia"],
    ),
    (
        MessageKey::CannedPrice,
        &["precio", "costo", "cuanto", "cuánto", "price", "cost", "how much", "preço", "quanto custa"],
    ),
    (
        MessageKey::CannedShipping,
        &["envio", "envío", "entrega", "shipping", "delivery", "entregar", "frete"],
    ),
    (
        MessageKey::CannedReturns,
        &["devol", "cambio", "return", "refund", "troca", "reembolso"],
    ),
    (
        MessageKey::CannedComplaint,
        &["problema", "error", "falla", "daño", "dano", "queja", "problem", "broken", "issue", "defeito"],
    ),
    (
        MessageKey::CannedFarewell,
        &["gracias", "adios", "adiós", "bye", "thanks", "thank you", "obrigado", "obrigada", "tchau"],
    ),
];

/// Picks a canned reply for the raw user text.
pub fn canned_reply(text: &str, language: Language) -> &'static str {
    let lower = text.to_lowercase();
    for (key, keywords) in BUCKETS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return localized(language, *key);
        }
    }
    localized(language, MessageKey::CannedGeneric)
}
