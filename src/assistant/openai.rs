use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PortfolioError, Result};

use super::{ChatTurn, ReplyProvider};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the OpenAI provider, read from the environment on every
/// request. The API key is the on/off switch; everything else has a default.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl OpenAiSettings {
    pub fn from_env() -> Self {
        Self {
            api_key: env_nonempty("OPENAI_API_KEY"),
            model: env_nonempty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env_nonempty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Chat-completions provider against the OpenAI API. Preferred first in
/// the waterfall; one attempt per request, no retries.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

// -- Wire types ----------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiProvider {
    /// `None` when no API key is configured — the provider is then simply
    /// absent from the waterfall rather than failing at request time.
    pub fn from_settings(settings: OpenAiSettings) -> Option<Self> {
        let api_key = settings.api_key?;
        Some(Self {
            client: Client::new(),
            api_key,
            base_url: settings.base_url,
            model: settings.model,
        })
    }
}

/// Pull the reply text out of a 2xx body. A body that doesn't match the
/// chat-completions shape degrades to the raw text instead of failing.
fn extract_reply(body: &str) -> String {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(resp) => {
            let content = resp
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .unwrap_or_default();
            if content.trim().is_empty() {
                warn!("openai response had no choice content, returning raw body");
                body.to_string()
            } else {
                content
            }
        }
        Err(e) => {
            warn!(err = %e, "openai response did not parse, returning raw body");
            body.to_string()
        }
    }
}

#[async_trait::async_trait]
impl ReplyProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, system_prompt: &str, transcript: &[ChatTurn]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut messages = vec![WireMessage {
            role: "system",
            content: system_prompt,
        }];
        messages.extend(transcript.iter().map(|turn| WireMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        }));

        let body = ChatRequest {
            model: &self.model,
            messages,
        };

        debug!(model = %self.model, turns = transcript.len(), "invoking OpenAI API");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PortfolioError::Provider(format!("openai request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PortfolioError::Provider(format!("openai body read failed: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|r| r.error.map(|e| e.message))
                .unwrap_or_else(|| text.clone());
            warn!(status = %status, error = %message, "openai API error");
            return Err(PortfolioError::Provider(format!(
                "openai returned {status}: {message}"
            )));
        }

        Ok(extract_reply(&text))
    }
}
