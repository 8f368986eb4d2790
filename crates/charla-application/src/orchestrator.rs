//! Turn orchestration.
//!
//! `TurnOrchestrator` owns the per-turn state machine: a single linear
//! pass with no retries, where each stage substitutes its own degraded
//! value on failure and the machine advances. Only an empty message
//! short-circuits before any stage runs, and no failure of any kind
//! escapes `handle_turn`.

use charla_core::analytics::AnalyticsSink;
use charla_core::config::ChatbotConfig;
use charla_core::error::Result;
use charla_core::generate::ReplyGenerator;
use charla_core::history::{expiry_epoch, HistoryRecord, HistoryStore};
use charla_core::intent::{IntentClassifier, Recognition, FALLBACK_INTENT};
use charla_core::language::{Language, LanguageDetector};
use charla_core::message::{localized, MessageKey};
use charla_core::sentiment::{SentimentAnalyzer, SentimentResult};
use charla_core::translate::Translator;
use charla_core::turn::{ResponseKind, TurnRequest, TurnResponse};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::bridge::BridgeTranslator;
use crate::context::ContextAssembler;
use crate::logger::TurnLogger;
use crate::resolver::LanguageResolver;
use crate::synthesizer::ReplySynthesizer;

/// Composes the per-turn pipeline from injected adapters.
///
/// Each inbound turn is handled by one stateless call; concurrent turns
/// share nothing but the durable stores behind the injected adapters.
pub struct TurnOrchestrator {
    resolver: LanguageResolver,
    bridge: BridgeTranslator,
    classifier: Arc<dyn IntentClassifier>,
    sentiment: Arc<dyn SentimentAnalyzer>,
    history: Arc<dyn HistoryStore>,
    assembler: ContextAssembler,
    synthesizer: ReplySynthesizer,
    logger: TurnLogger,
    session_ttl_secs: u64,
    history_window: usize,
}

impl TurnOrchestrator {
    /// Creates an orchestrator over the given adapters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &ChatbotConfig,
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        classifier: Arc<dyn IntentClassifier>,
        sentiment: Arc<dyn SentimentAnalyzer>,
        generator: Arc<dyn ReplyGenerator>,
        history: Arc<dyn HistoryStore>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            resolver: LanguageResolver::new(detector),
            bridge: BridgeTranslator::new(translator),
            classifier,
            sentiment,
            history: history.clone(),
            assembler: ContextAssembler::new(config.history_window),
            synthesizer: ReplySynthesizer::new(generator),
            logger: TurnLogger::new(history, analytics),
            session_ttl_secs: config.session_ttl_secs,
            history_window: config.history_window,
        }
    }

    /// Handles one turn. Never fails: every outcome, including an
    /// unexpected pipeline error, is a well-formed response.
    pub async fn handle_turn(&self, request: TurnRequest) -> TurnResponse {
        let now = Utc::now();

        if request.message_text.trim().is_empty() {
            let language = request
                .language
                .as_deref()
                .map(Language::from_code_or_default)
                .unwrap_or_default();
            return TurnResponse::validation_error(
                request.session_id.clone(),
                localized(language, MessageKey::EmptyMessage),
                language,
                now,
            );
        }

        match self.run_pipeline(&request, now).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%err, session_id = %request.session_id, "pipeline failed");
                let language = request
                    .language
                    .as_deref()
                    .map(Language::from_code_or_default)
                    .unwrap_or_default();
                TurnResponse {
                    kind: ResponseKind::Error,
                    session_id: request.session_id,
                    message: localized(language, MessageKey::Apology).to_string(),
                    intent: FALLBACK_INTENT.to_string(),
                    sentiment: Default::default(),
                    language,
                    timestamp: now,
                }
            }
        }
    }

    async fn run_pipeline(
        &self,
        request: &TurnRequest,
        now: DateTime<Utc>,
    ) -> Result<TurnResponse> {
        let raw_text = request.message_text.trim();

        // RESOLVE_LANGUAGE
        let (language, confidence) = self
            .resolver
            .resolve(raw_text, request.language.as_deref())
            .await;
        tracing::debug!(session_id = %request.session_id, %language, confidence, "language resolved");

        // BRIDGE_IN
        let pivot_text = self
            .bridge
            .translate_or_original(raw_text, language, Language::PIVOT)
            .await;

        // CLASSIFY_INTENT
        let recognition = match self
            .classifier
            .classify(&pivot_text, language, &request.session_id)
            .await
        {
            Ok(recognition) => recognition,
            Err(err) => {
                tracing::warn!(%err, "intent classification failed, using fallback intent");
                Recognition::fallback(language)
            }
        };

        // ANALYZE_SENTIMENT
        let sentiment = match self.sentiment.detect_sentiment(raw_text, language).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%err, "sentiment analysis failed, assuming neutral");
                SentimentResult::neutral()
            }
        };

        // FETCH_HISTORY - the store reports newest first; reverse into
        // chronological order before assembly.
        let history = match self
            .history
            .fetch_recent(&request.session_id, self.history_window)
            .await
        {
            Ok(mut records) => {
                records.reverse();
                records
            }
            Err(err) => {
                tracing::warn!(%err, "history fetch failed, continuing with empty history");
                Vec::new()
            }
        };

        // ASSEMBLE_CONTEXT
        let context = self
            .assembler
            .assemble(&recognition, sentiment.sentiment, language, &history);

        // SYNTHESIZE_REPLY
        let reply = self.synthesizer.synthesize(raw_text, &context, language).await;

        // BRIDGE_OUT
        let reply_text = self
            .bridge
            .translate_or_original(&reply.text, reply.language, language)
            .await;

        // PERSIST + EMIT_ANALYTICS
        let record = HistoryRecord {
            session_id: request.session_id.clone(),
            user_id: request.user_id.clone(),
            user_message: raw_text.to_string(),
            bot_reply: reply_text.clone(),
            sentiment: sentiment.sentiment,
            language,
            intent_name: recognition.intent_name.clone(),
            created_at: now,
            expires_at: expiry_epoch(now, self.session_ttl_secs),
        };
        self.logger.log_turn(&record).await;

        // RESPOND
        Ok(TurnResponse {
            kind: ResponseKind::Message,
            session_id: request.session_id.clone(),
            message: reply_text,
            intent: recognition.intent_name,
            sentiment: sentiment.sentiment,
            language,
            timestamp: now,
        })
    }
}
