//! TableAnalyticsSink - analytics emission into the table store.
//!
//! Events land in the analytics table under partition key
//! `METRIC#<type>` with sort key `EVENT#<event_id>`.

use async_trait::async_trait;
use charla_core::analytics::{AnalyticsEvent, AnalyticsSink};
use charla_core::error::Result;
use serde::Serialize;
use std::collections::HashMap;

use crate::table_api::TableApiClient;

/// Analytics sink backed by the document-table service.
#[derive(Clone)]
pub struct TableAnalyticsSink {
    client: TableApiClient,
    table: String,
}

impl TableAnalyticsSink {
    pub fn new(client: TableApiClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl AnalyticsSink for TableAnalyticsSink {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<()> {
        let item = serde_json::to_value(AnalyticsItem::from_event(event))?;
        self.client.put_item(&self.table, &item).await?;
        tracing::debug!(metric = %event.metric_type, "emitted analytics event");
        Ok(())
    }
}

/// Wire shape of an analytics event in the analytics table.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsItem<'a> {
    #[serde(rename = "PK")]
    pk: String,
    #[serde(rename = "SK")]
    sk: String,
    metric_type: String,
    date: &'a str,
    value: u32,
    metadata: &'a HashMap<String, String>,
    #[serde(rename = "TTL")]
    ttl: i64,
}

impl<'a> AnalyticsItem<'a> {
    fn from_event(event: &'a AnalyticsEvent) -> Self {
        Self {
            pk: format!("METRIC#{}", event.metric_type),
            sk: format!("EVENT#{}", event.event_id),
            metric_type: event.metric_type.to_string(),
            date: &event.date,
            value: event.value,
            metadata: &event.metadata,
            ttl: event.expires_at,
        }
    }
}
