//! Runtime configuration model.
//!
//! The struct mirrors the deployment's environment: service endpoints,
//! table names, record TTLs, and the generation context window. Loading
//! (TOML file plus environment overrides) lives in the infrastructure
//! crate; this is just the validated shape with defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for the chat backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotConfig {
    #[serde(default)]
    pub services: ServiceEndpoints,

    #[serde(default)]
    pub tables: TableNames,

    /// History record TTL in seconds (default 7 days).
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Number of prior turns fed into generation context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

/// Endpoints and credentials for the external services.
///
/// Every endpoint is optional; an absent endpoint means the corresponding
/// adapter is unavailable and the pipeline runs on that stage's fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    /// NLU bot runtime (intent classification).
    pub nlu_url: Option<String>,
    pub nlu_bot_id: Option<String>,
    pub nlu_bot_alias_id: Option<String>,

    /// Text analytics service (sentiment + language detection).
    pub text_analytics_url: Option<String>,

    /// Translation engine.
    pub translate_url: Option<String>,

    /// Generative model backend (chat completions).
    pub generation_url: Option<String>,
    pub generation_api_key: Option<String>,
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Document-table store for history and analytics.
    pub table_store_url: Option<String>,
    pub table_store_api_key: Option<String>,
}

/// Store table names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableNames {
    #[serde(default = "default_conversations_table")]
    pub conversations: String,
    #[serde(default = "default_analytics_table")]
    pub analytics: String,
}

fn default_session_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_history_window() -> usize {
    5
}

fn default_generation_model() -> String {
    "deepseek-r1".to_string()
}

fn default_conversations_table() -> String {
    "ChatbotConversations".to_string()
}

fn default_analytics_table() -> String {
    "ChatbotAnalytics".to_string()
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            nlu_url: None,
            nlu_bot_id: None,
            nlu_bot_alias_id: None,
            text_analytics_url: None,
            translate_url: None,
            generation_url: None,
            generation_api_key: None,
            generation_model: default_generation_model(),
            table_store_url: None,
            table_store_api_key: None,
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            conversations: default_conversations_table(),
            analytics: default_analytics_table(),
        }
    }
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            services: ServiceEndpoints::default(),
            tables: TableNames::default(),
            session_ttl_secs: default_session_ttl_secs(),
            history_window: default_history_window(),
        }
    }
}
