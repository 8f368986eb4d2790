//! In-memory history store and analytics sink.
//!
//! Used by the REPL when no table-store endpoint is configured, and as
//! shared test doubles. The history store preserves the table store's
//! native read order (newest first) so callers exercise the same
//! reverse-before-use contract.

use async_trait::async_trait;
use charla_core::analytics::{AnalyticsEvent, AnalyticsSink};
use charla_core::error::Result;
use charla_core::history::{HistoryRecord, HistoryStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// History store keeping records per session in process memory.
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    sessions: Arc<RwLock<HashMap<String, Vec<HistoryRecord>>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored for a session.
    pub async fn len(&self, session_id: &str) -> usize {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn fetch_recent(&self, session_id: &str, limit: usize) -> Result<Vec<HistoryRecord>> {
        let sessions = self.sessions.read().await;
        let records = sessions.get(session_id).map(Vec::as_slice).unwrap_or(&[]);
        // Native order is newest first, like a descending table query.
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn persist(&self, record: &HistoryRecord) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(record.session_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}

/// Analytics sink collecting events in process memory.
#[derive(Clone, Default)]
pub struct InMemoryAnalyticsSink {
    events: Arc<RwLock<Vec<AnalyticsEvent>>>,
}

impl InMemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AnalyticsSink for InMemoryAnalyticsSink {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
