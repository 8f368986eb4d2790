//! Turn logging: history persistence and analytics emission.

use charla_core::analytics::{AnalyticsEvent, AnalyticsSink, MetricType};
use charla_core::history::{HistoryRecord, HistoryStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Persists finished turns and emits one analytics event per turn.
///
/// The store itself fails loud; this is where the orchestrator's policy
/// is applied: a persist failure is logged but the already-computed reply
/// is still returned, and analytics emission is best-effort by contract.
pub struct TurnLogger {
    history: Arc<dyn HistoryStore>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl TurnLogger {
    pub fn new(history: Arc<dyn HistoryStore>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self { history, analytics }
    }

    /// Writes the history record and emits the MESSAGE analytics event.
    pub async fn log_turn(&self, record: &HistoryRecord) {
        if let Err(err) = self.history.persist(record).await {
            tracing::error!(
                %err,
                session_id = %record.session_id,
                "failed to persist turn, reply returned anyway"
            );
        }

        let metadata = HashMap::from([
            ("sessionId".to_string(), record.session_id.clone()),
            ("intent".to_string(), record.intent_name.clone()),
            ("sentiment".to_string(), record.sentiment.to_string()),
            ("language".to_string(), record.language.code().to_string()),
        ]);
        let event = AnalyticsEvent::new(MetricType::Message, metadata, record.created_at);
        if let Err(err) = self.analytics.emit(&event).await {
            tracing::warn!(%err, "failed to emit analytics event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_core::error::{CharlaError, Result};
    use charla_core::history::expiry_epoch;
    use charla_core::language::Language;
    use charla_core::sentiment::Sentiment;
    use charla_infrastructure::{InMemoryAnalyticsSink, InMemoryHistoryStore};
    use chrono::Utc;

    struct FailingStore;

    #[async_trait::async_trait]
    impl HistoryStore for FailingStore {
        async fn fetch_recent(&self, _session_id: &str, _limit: usize) -> Result<Vec<HistoryRecord>> {
            Err(CharlaError::data_access("store down"))
        }

        async fn persist(&self, _record: &HistoryRecord) -> Result<()> {
            Err(CharlaError::data_access("store down"))
        }
    }

    fn sample_record() -> HistoryRecord {
        let created_at = Utc::now();
        HistoryRecord {
            session_id: "s-1".to_string(),
            user_id: "u-1".to_string(),
            user_message: "hola".to_string(),
            bot_reply: "¡Hola!".to_string(),
            sentiment: Sentiment::Positive,
            language: Language::Es,
            intent_name: "GreetingIntent".to_string(),
            created_at,
            expires_at: expiry_epoch(created_at, 60),
        }
    }

    #[tokio::test]
    async fn test_log_turn_persists_and_emits() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let sink = Arc::new(InMemoryAnalyticsSink::new());
        let logger = TurnLogger::new(store.clone(), sink.clone());

        logger.log_turn(&sample_record()).await;

        assert_eq!(store.len("s-1").await, 1);
        let events = sink.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metric_type, MetricType::Message);
        assert_eq!(events[0].metadata.get("intent").unwrap(), "GreetingIntent");
        assert_eq!(events[0].metadata.get("sentiment").unwrap(), "POSITIVE");
        assert_eq!(events[0].metadata.get("language").unwrap(), "es");
    }

    #[tokio::test]
    async fn test_persist_failure_still_emits_analytics() {
        let sink = Arc::new(InMemoryAnalyticsSink::new());
        let logger = TurnLogger::new(Arc::new(FailingStore), sink.clone());

        // Must not panic or propagate.
        logger.log_turn(&sample_record()).await;
        assert_eq!(sink.events().await.len(), 1);
    }
}
