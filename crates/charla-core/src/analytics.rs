//! Analytics events and the best-effort emission contract.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Analytics events expire 30 days after emission.
pub const ANALYTICS_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Kind of metric an analytics event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MetricType {
    Connection,
    Message,
    Fallback,
    Feedback,
}

/// One analytics data point, bucketed by calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub metric_type: MetricType,
    /// Synthetic unique event id.
    pub event_id: String,
    /// Date bucket in `YYYY-MM-DD` form.
    pub date: String,
    pub value: u32,
    pub metadata: HashMap<String, String>,
    /// Expiry epoch in seconds.
    pub expires_at: i64,
}

impl AnalyticsEvent {
    /// Creates a unit-valued event stamped at `now` with a fresh event id
    /// and the standard 30-day expiry.
    pub fn new(metric_type: MetricType, metadata: HashMap<String, String>, now: DateTime<Utc>) -> Self {
        Self {
            metric_type,
            event_id: Uuid::new_v4().to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            value: 1,
            metadata,
            expires_at: now.timestamp() + ANALYTICS_TTL_SECS as i64,
        }
    }
}

/// An abstract sink for analytics events.
///
/// Emission is best-effort; callers swallow errors after recording them,
/// an emission failure must never fail the turn.
#[async_trait::async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<()>;
}
