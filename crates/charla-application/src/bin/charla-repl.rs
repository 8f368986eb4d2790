//! Terminal chat loop for exercising the turn pipeline.
//!
//! Wires adapters from the configuration file (`CHARLA_CONFIG`, default
//! `charla.toml`) and `CHARLA_*` environment overrides. Services without
//! a configured endpoint run as unavailable adapters, so the pipeline
//! exercises its per-stage fallbacks; without a table store, history
//! lives in process memory for the session.

use charla_application::TurnOrchestrator;
use charla_core::analytics::AnalyticsSink;
use charla_core::config::ChatbotConfig;
use charla_core::error::{CharlaError, Result};
use charla_core::generate::{RawCompletion, ReplyGenerator};
use charla_core::history::{HistoryRecord, HistoryStore};
use charla_core::intent::{IntentClassifier, Recognition};
use charla_core::language::{DetectedLanguage, Language, LanguageDetector};
use charla_core::sentiment::{SentimentAnalyzer, SentimentResult};
use charla_core::translate::Translator;
use charla_core::turn::TurnRequest;
use charla_infrastructure::{
    load_config, InMemoryAnalyticsSink, InMemoryHistoryStore, TableAnalyticsSink, TableApiClient,
    TableHistoryStore,
};
use charla_interaction::{
    NluApiClassifier, ReasoningApiGenerator, TextAnalyticsClient, TranslateApiClient,
};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Stands in for any service without a configured endpoint; every call
/// fails as an adapter error and the pipeline degrades per stage.
struct Unconfigured(&'static str);

impl Unconfigured {
    fn err(&self) -> CharlaError {
        CharlaError::adapter(self.0, "no endpoint configured")
    }
}

#[async_trait::async_trait]
impl LanguageDetector for Unconfigured {
    async fn detect_language(&self, _text: &str) -> Result<DetectedLanguage> {
        Err(self.err())
    }
}

#[async_trait::async_trait]
impl Translator for Unconfigured {
    async fn translate(&self, _text: &str, _source: Language, _target: Language) -> Result<String> {
        Err(self.err())
    }
}

#[async_trait::async_trait]
impl IntentClassifier for Unconfigured {
    async fn classify(
        &self,
        _text: &str,
        _language: Language,
        _session_id: &str,
    ) -> Result<Recognition> {
        Err(self.err())
    }
}

#[async_trait::async_trait]
impl SentimentAnalyzer for Unconfigured {
    async fn detect_sentiment(&self, _text: &str, _language: Language) -> Result<SentimentResult> {
        Err(self.err())
    }
}

#[async_trait::async_trait]
impl ReplyGenerator for Unconfigured {
    async fn generate(&self, _prompt: &str, _context: &str) -> Result<RawCompletion> {
        Err(self.err())
    }
}

fn build_orchestrator(config: &ChatbotConfig) -> TurnOrchestrator {
    let services = &config.services;

    let text_analytics = services
        .text_analytics_url
        .as_ref()
        .map(|url| Arc::new(TextAnalyticsClient::new(url)));
    let detector: Arc<dyn LanguageDetector> = match &text_analytics {
        Some(client) => client.clone(),
        None => Arc::new(Unconfigured("text-analytics")),
    };
    let sentiment: Arc<dyn SentimentAnalyzer> = match &text_analytics {
        Some(client) => client.clone(),
        None => Arc::new(Unconfigured("text-analytics")),
    };

    let translator: Arc<dyn Translator> = match &services.translate_url {
        Some(url) => Arc::new(TranslateApiClient::new(url)),
        None => Arc::new(Unconfigured("translate")),
    };

    let classifier: Arc<dyn IntentClassifier> = match (
        &services.nlu_url,
        &services.nlu_bot_id,
        &services.nlu_bot_alias_id,
    ) {
        (Some(url), Some(bot_id), Some(alias_id)) => {
            Arc::new(NluApiClassifier::new(url, bot_id, alias_id))
        }
        _ => Arc::new(Unconfigured("nlu")),
    };

    let generator: Arc<dyn ReplyGenerator> = match &services.generation_url {
        Some(url) => {
            let mut client = ReasoningApiGenerator::new(url, services.generation_model.clone());
            if let Some(key) = &services.generation_api_key {
                client = client.with_api_key(key);
            }
            Arc::new(client)
        }
        None => Arc::new(Unconfigured("generation")),
    };

    let (history, analytics): (Arc<dyn HistoryStore>, Arc<dyn AnalyticsSink>) =
        match &services.table_store_url {
            Some(url) => {
                let mut client = TableApiClient::new(url);
                if let Some(key) = &services.table_store_api_key {
                    client = client.with_api_key(key);
                }
                (
                    Arc::new(TableHistoryStore::new(
                        client.clone(),
                        config.tables.conversations.clone(),
                    )),
                    Arc::new(TableAnalyticsSink::new(
                        client,
                        config.tables.analytics.clone(),
                    )),
                )
            }
            None => (
                Arc::new(InMemoryHistoryStore::new()),
                Arc::new(InMemoryAnalyticsSink::new()),
            ),
        };

    TurnOrchestrator::new(
        config, detector, translator, classifier, sentiment, generator, history, analytics,
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = std::env::var("CHARLA_CONFIG").unwrap_or_else(|_| "charla.toml".to_string());
    let config = load_config(Some(Path::new(&config_path)))?;
    let orchestrator = build_orchestrator(&config);

    let language = std::env::args().nth(1);
    let session_id = Uuid::new_v4().to_string();
    let user_id = std::env::var("USER").unwrap_or_else(|_| "local".to_string());

    println!("charla session {session_id} (exit with 'quit' or Ctrl-D)");

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let response = orchestrator
            .handle_turn(TurnRequest {
                session_id: session_id.clone(),
                user_id: user_id.clone(),
                message_text: line.to_string(),
                language: language.clone(),
            })
            .await;

        println!(
            "bot [{} | {} | {}]> {}",
            response.intent, response.sentiment, response.language, response.message
        );
    }

    Ok(())
}
