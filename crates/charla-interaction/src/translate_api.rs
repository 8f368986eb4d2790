//! TranslateApiClient - REST client for the translation engine.

use async_trait::async_trait;
use charla_core::error::{CharlaError, Result};
use charla_core::language::Language;
use charla_core::translate::Translator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "translate";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the translation service.
#[derive(Clone)]
pub struct TranslateApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl TranslateApiClient {
    /// Creates a new client for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Translator for TranslateApiClient {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        let url = format!("{}/translate", self.base_url.trim_end_matches('/'));
        let request = TranslateRequest {
            text,
            source_language_code: source.code(),
            target_language_code: target.code(),
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CharlaError::adapter(
                SERVICE,
                format!("translate returned {}", response.status()),
            ));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("invalid response: {err}")))?;

        tracing::debug!(source = %source, target = %target, "translated text");
        Ok(parsed.translated_text)
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source_language_code: &'a str,
    target_language_code: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}
