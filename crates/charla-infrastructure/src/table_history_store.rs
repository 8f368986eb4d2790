//! TableHistoryStore - history persistence over the table store.
//!
//! Records live in the conversations table under partition key
//! `SESSION#<session_id>` with sort key `MSG#<rfc3339 timestamp>`, so a
//! descending query returns a session's most recent turns first. Both
//! operations fail loud; degrading is the orchestrator's call.

use async_trait::async_trait;
use charla_core::error::{CharlaError, Result};
use charla_core::history::{HistoryRecord, HistoryStore};
use charla_core::language::Language;
use charla_core::sentiment::Sentiment;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::table_api::TableApiClient;

const SESSION_PREFIX: &str = "SESSION#";
const MESSAGE_PREFIX: &str = "MSG#";

/// History store backed by the document-table service.
#[derive(Clone)]
pub struct TableHistoryStore {
    client: TableApiClient,
    table: String,
}

impl TableHistoryStore {
    pub fn new(client: TableApiClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl HistoryStore for TableHistoryStore {
    async fn fetch_recent(&self, session_id: &str, limit: usize) -> Result<Vec<HistoryRecord>> {
        let partition_key = format!("{SESSION_PREFIX}{session_id}");
        let items = self
            .client
            .query(&self.table, &partition_key, limit, true)
            .await?;

        items
            .into_iter()
            .map(|item| {
                let item: HistoryItem = serde_json::from_value(item)
                    .map_err(|err| CharlaError::data_access(format!("malformed history item: {err}")))?;
                item.into_record()
            })
            .collect()
    }

    async fn persist(&self, record: &HistoryRecord) -> Result<()> {
        let item = serde_json::to_value(HistoryItem::from_record(record))?;
        self.client.put_item(&self.table, &item).await?;
        tracing::debug!(session_id = %record.session_id, "persisted history record");
        Ok(())
    }
}

/// Wire shape of a history record in the conversations table.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryItem {
    #[serde(rename = "PK")]
    pk: String,
    #[serde(rename = "SK")]
    sk: String,
    user_id: String,
    user_message: String,
    bot_response: String,
    sentiment: Sentiment,
    language: Language,
    intent_name: String,
    created_at: DateTime<Utc>,
    #[serde(rename = "TTL")]
    ttl: i64,
}

impl HistoryItem {
    fn from_record(record: &HistoryRecord) -> Self {
        let timestamp = record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Micros, true);
        Self {
            pk: format!("{SESSION_PREFIX}{}", record.session_id),
            sk: format!("{MESSAGE_PREFIX}{timestamp}"),
            user_id: record.user_id.clone(),
            user_message: record.user_message.clone(),
            bot_response: record.bot_reply.clone(),
            sentiment: record.sentiment,
            language: record.language,
            intent_name: record.intent_name.clone(),
            created_at: record.created_at,
            ttl: record.expires_at,
        }
    }

    fn into_record(self) -> Result<HistoryRecord> {
        let session_id = self
            .pk
            .strip_prefix(SESSION_PREFIX)
            .ok_or_else(|| CharlaError::data_access(format!("unexpected partition key: {}", self.pk)))?
            .to_string();

        Ok(HistoryRecord {
            session_id,
            user_id: self.user_id,
            user_message: self.user_message,
            bot_reply: self.bot_response,
            sentiment: self.sentiment,
            language: self.language,
            intent_name: self.intent_name,
            created_at: self.created_at,
            expires_at: self.ttl,
        })
    }
}
