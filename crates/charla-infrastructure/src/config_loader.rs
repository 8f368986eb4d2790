//! Configuration loading.
//!
//! Reads `ChatbotConfig` from an optional TOML file, then overlays
//! `CHARLA_*` environment variables so deployments can override any
//! endpoint without touching the file.

use charla_core::config::ChatbotConfig;
use charla_core::error::{CharlaError, Result};
use std::path::Path;

/// Loads configuration from `path` (when present) and the environment.
///
/// A missing file is not an error; the defaults apply. A file that
/// exists but fails to parse is.
pub fn load_config(path: Option<&Path>) -> Result<ChatbotConfig> {
    let mut config = match path {
        Some(path) if path.exists() => {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw).map_err(|err| CharlaError::Serialization {
                format: "TOML".to_string(),
                message: err.to_string(),
            })?
        }
        _ => ChatbotConfig::default(),
    };

    overlay(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Applies environment-style overrides through a lookup function.
fn overlay(config: &mut ChatbotConfig, lookup: impl Fn(&str) -> Option<String>) {
    let services = &mut config.services;
    let set = |slot: &mut Option<String>, name: &str| {
        if let Some(value) = lookup(name) {
            *slot = Some(value);
        }
    };

    set(&mut services.nlu_url, "CHARLA_NLU_URL");
    set(&mut services.nlu_bot_id, "CHARLA_NLU_BOT_ID");
    set(&mut services.nlu_bot_alias_id, "CHARLA_NLU_BOT_ALIAS_ID");
    set(&mut services.text_analytics_url, "CHARLA_TEXT_ANALYTICS_URL");
    set(&mut services.translate_url, "CHARLA_TRANSLATE_URL");
    set(&mut services.generation_url, "CHARLA_GENERATION_URL");
    set(&mut services.generation_api_key, "CHARLA_GENERATION_API_KEY");
    set(&mut services.table_store_url, "CHARLA_TABLE_STORE_URL");
    set(&mut services.table_store_api_key, "CHARLA_TABLE_STORE_API_KEY");

    if let Some(model) = lookup("CHARLA_GENERATION_MODEL") {
        services.generation_model = model;
    }
    if let Some(table) = lookup("CHARLA_CONVERSATIONS_TABLE") {
        config.tables.conversations = table;
    }
    if let Some(table) = lookup("CHARLA_ANALYTICS_TABLE") {
        config.tables.analytics = table;
    }
}
