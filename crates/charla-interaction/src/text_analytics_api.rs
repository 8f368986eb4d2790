//! TextAnalyticsClient - REST client for sentiment and language detection.
//!
//! One backend serves both calls, so one client implements both traits.

use async_trait::async_trait;
use charla_core::error::{CharlaError, Result};
use charla_core::language::{DetectedLanguage, Language, LanguageDetector};
use charla_core::sentiment::{Sentiment, SentimentAnalyzer, SentimentResult, SentimentScores};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "text-analytics";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the text-analytics service.
#[derive(Clone)]
pub struct TextAnalyticsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl TextAnalyticsClient {
    /// Creates a new client for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Adds an API key sent as a bearer token with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn post<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.post(&url).timeout(self.timeout).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CharlaError::adapter(
                SERVICE,
                format!("{path} returned {}", response.status()),
            ));
        }

        response
            .json()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("invalid response: {err}")))
    }
}

#[async_trait]
impl SentimentAnalyzer for TextAnalyticsClient {
    async fn detect_sentiment(&self, text: &str, language: Language) -> Result<SentimentResult> {
        let request = SentimentRequest {
            text,
            language: language.code(),
        };
        let response: SentimentResponse = self.post("sentiment", &request).await?;

        tracing::debug!(sentiment = %response.sentiment, "detected sentiment");
        Ok(SentimentResult {
            sentiment: response.sentiment,
            scores: response.scores,
        })
    }
}

#[async_trait]
impl LanguageDetector for TextAnalyticsClient {
    async fn detect_language(&self, text: &str) -> Result<DetectedLanguage> {
        let request = LanguageRequest { text };
        let response: LanguageResponse = self.post("language", &request).await?;

        let dominant = response
            .languages
            .into_iter()
            .next()
            .ok_or_else(|| CharlaError::adapter(SERVICE, "no languages detected"))?;

        tracing::debug!(
            code = %dominant.code,
            confidence = dominant.score,
            "detected language"
        );
        Ok(DetectedLanguage {
            code: dominant.code,
            confidence: dominant.score,
        })
    }
}

#[derive(Serialize)]
struct SentimentRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
struct SentimentResponse {
    sentiment: Sentiment,
    scores: SentimentScores,
}

#[derive(Serialize)]
struct LanguageRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct LanguageResponse {
    languages: Vec<DominantLanguage>,
}

#[derive(Deserialize)]
struct DominantLanguage {
    code: String,
    score: f32,
}
