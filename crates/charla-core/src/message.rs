//! Localized user-facing message table.
//!
//! Every message the pipeline can emit on its own (degraded replies,
//! canned fallbacks, apologies) lives here, keyed by `(Language,
//! MessageKey)`. The nested exhaustive match makes a missing translation
//! a compile error; the iteration test below additionally asserts no
//! entry is blank.

use crate::language::Language;
use strum_macros::EnumIter;

/// Key of a localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum MessageKey {
    /// Generic classifier/service error shown inside a turn.
    GenericError,
    /// Neutral acknowledgment used when no reply text could be recovered.
    Acknowledgment,
    /// Top-level apology when the pipeline itself fails.
    Apology,
    /// Validation failure for an empty inbound message.
    EmptyMessage,
    /// Help text offered when the bot did not understand the question.
    FallbackHelp,
    /// Canned replies for the keyword-bucket fallback.
    CannedGreeting,
    CannedPrice,
    CannedShipping,
    CannedReturns,
    CannedComplaint,
    CannedFarewell,
    CannedGeneric,
}

/// Looks up the message for `key` in `language`.
pub fn localized(language: Language, key: MessageKey) -> &'static str {
    use MessageKey::*;
    match language {
        Language::Es => match key {
            GenericError => "Lo siento, ocurrió un error. Por favor, intenta de nuevo.",
            Acknowledgment => "¿En qué puedo ayudarte?",
            Apology => "Lo siento, no pude procesar tu mensaje. Por favor, intenta de nuevo.",
            EmptyMessage => "No recibí ningún mensaje. ¿Puedes escribirlo de nuevo?",
            FallbackHelp => {
                "No logré entender tu pregunta. Puedo ayudarte con información sobre precios, \
                 envíos, devoluciones y más. ¿Sobre qué te gustaría saber?"
            }
            CannedGreeting => "¡Hola! Soy tu asistente virtual. ¿En qué puedo ayudarte?",
            CannedPrice => "Los precios varían según el producto. ¿Cuál te interesa?",
            CannedShipping => "El envío tarda 3-5 días en zonas urbanas y 5-7 en zonas rurales.",
            CannedReturns => "Aceptamos devoluciones en 30 días con empaque original.",
            CannedComplaint => "Lamento escuchar eso. Cuéntame más sobre el problema.",
            CannedFarewell => "¡Gracias por contactarnos! Que tengas un excelente día.",
            CannedGeneric => "Gracias por tu mensaje. ¿Cómo puedo ayudarte?",
        },
        Language::En => match key {
            GenericError => "Sorry, something went wrong. Please try again.",
            Acknowledgment => "How can I help you?",
            Apology => "Sorry, I could not process your message. Please try again.",
            EmptyMessage => "I did not receive any message. Could you type it again?",
            FallbackHelp => {
                "I could not understand your question. I can help you with information about \
                 prices, shipping, returns and more. What would you like to know?"
            }
            CannedGreeting => "Hi! I am your virtual assistant. How can I help you?",
            CannedPrice => "Prices vary by product. Which one are you interested in?",
            CannedShipping => "Shipping takes 3-5 days in urban areas and 5-7 in rural areas.",
            CannedReturns => "We accept returns within 30 days with the original packaging.",
            CannedComplaint => "I am sorry to hear that. Tell me more about the problem.",
            CannedFarewell => "Thanks for reaching out! Have a great day.",
            CannedGeneric => "Thanks for your message. How can I help you?",
        },
        Language::Pt => match key {
            GenericError => "Desculpe, ocorreu um erro. Por favor, tente novamente.",
            Acknowledgment => "Como posso ajudá-lo?",
            Apology => "Desculpe, não consegui processar sua mensagem. Por favor, tente novamente.",
            EmptyMessage => "Não recebi nenhuma mensagem. Pode digitá-la novamente?",
            FallbackHelp => {
                "Não consegui entender sua pergunta. Posso ajudá-lo com informações sobre \
                 preços, envios, devoluções e mais. Sobre o que você gostaria de saber?"
            }
            CannedGreeting => "Olá! Sou seu assistente virtual. Como posso ajudar?",
            CannedPrice => "Os preços variam conforme o produto. Qual lhe interessa?",
            CannedShipping => "A entrega leva de 3 a 5 dias em áreas urbanas e de 5 a 7 em áreas rurais.",
            CannedReturns => "Aceitamos devoluções em até 30 dias com a embalagem original.",
            CannedComplaint => "Lamento ouvir isso. Conte-me mais sobre o problema.",
            CannedFarewell => "Obrigado pelo contato! Tenha um ótimo dia.",
            CannedGeneric => "Obrigado pela sua mensagem. Como posso ajudar?",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_key_exists_for_every_language() {
        for language in Language::iter() {
            for key in MessageKey::iter() {
                let text = localized(language, key);
                assert!(
                    !text.trim().is_empty(),
                    "blank message for {:?}/{:?}",
                    language,
                    key
                );
            }
        }
    }

    #[test]
    fn test_translations_differ_across_languages() {
        for key in MessageKey::iter() {
            let es = localized(Language::Es, key);
            let en = localized(Language::En, key);
            assert_ne!(es, en, "untranslated entry for {:?}", key);
        }
    }
}
