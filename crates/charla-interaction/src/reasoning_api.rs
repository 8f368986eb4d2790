//! ReasoningApiGenerator - chat-completions client for the reasoning model.
//!
//! The backend follows the OpenAI chat-completions shape. Reasoning models
//! may put the answer in `content` or think out loud in `reasoning_content`;
//! this client returns both verbatim. Mining the usable answer out of a
//! reasoning trace is the reply synthesizer's job, not the transport's.

use async_trait::async_trait;
use charla_core::error::{CharlaError, Result};
use charla_core::generate::{RawCompletion, ReplyGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "generation";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "Eres un asistente virtual amable para una tienda en línea.\n\
    Responde de forma breve y directa (1-2 oraciones máximo).\n\
    Sé útil, empático y profesional.";

/// Generative backend client for the reasoning model.
#[derive(Clone)]
pub struct ReasoningApiGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl ReasoningApiGenerator {
    /// Creates a new generator for the given endpoint and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
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

    fn build_request<'a>(&'a self, prompt: &'a str, context: &'a str) -> ChatCompletionRequest<'a> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        }];
        if !context.trim().is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: context.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt.to_string(),
        });

        ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    fn extract(response: ChatCompletionResponse) -> RawCompletion {
        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .unwrap_or_default();

        RawCompletion {
            content: message.content.filter(|content| !content.is_empty()),
            reasoning: message
                .reasoning_content
                .filter(|reasoning| !reasoning.is_empty()),
        }
    }
}

#[async_trait]
impl ReplyGenerator for ReasoningApiGenerator {
    async fn generate(&self, prompt: &str, context: &str) -> Result<RawCompletion> {
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let request = self.build_request(prompt, context);

        let mut builder = self.client.post(&url).timeout(self.timeout).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CharlaError::adapter(
                SERVICE,
                format!("chat completion returned {}", response.status()),
            ));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| CharlaError::adapter(SERVICE, format!("invalid response: {err}")))?;

        let completion = Self::extract(parsed);
        tracing::debug!(
            has_content = completion.content.is_some(),
            has_reasoning = completion.reasoning.is_some(),
            "generation completed"
        );
        Ok(completion)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Default)]
struct ChoiceMessage {
    content: Option<String>,
    reasoning_content: Option<String>,
}
