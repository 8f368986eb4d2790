//! Persisted turn records and the history store contract.

use crate::error::Result;
use crate::language::Language;
use crate::sentiment::Sentiment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed turn as persisted per session.
///
/// Records are immutable once written and expire automatically at
/// `expires_at`. They are keyed by session and turn timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub session_id: String,
    pub user_id: String,
    pub user_message: String,
    pub bot_reply: String,
    pub sentiment: Sentiment,
    pub language: Language,
    pub intent_name: String,
    pub created_at: DateTime<Utc>,
    /// Expiry epoch in seconds; always strictly greater than `created_at`.
    pub expires_at: i64,
}

/// Computes an expiry epoch strictly greater than the creation time,
/// even for a zero TTL.
pub fn expiry_epoch(created_at: DateTime<Utc>, ttl_secs: u64) -> i64 {
    created_at.timestamp() + (ttl_secs.max(1) as i64)
}

/// An abstract store for per-session turn history.
///
/// Both operations fail loud: history loss or duplication has downstream
/// correctness impact the orchestrator must decide how to handle, so
/// implementations propagate errors rather than silently degrading.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns up to `limit` most recent records for the session in the
    /// store's native order. Native order is unspecified; callers must
    /// reverse into chronological (oldest-first) order before use.
    async fn fetch_recent(&self, session_id: &str, limit: usize) -> Result<Vec<HistoryRecord>>;

    /// Writes one immutable record keyed by session and turn timestamp.
    async fn persist(&self, record: &HistoryRecord) -> Result<()>;
}
