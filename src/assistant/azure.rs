use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PortfolioError, Result};

use super::{ChatTurn, ReplyProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Which request/response shape to speak against the Azure deployment.
/// Selected by an explicit configuration flag, never by sniffing the
/// deployment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    ChatCompletions,
    Responses,
}

/// Settings for the Azure OpenAI provider, read from the environment on
/// every request. All four credential fields are required; a partial set
/// leaves the provider out of the waterfall.
#[derive(Debug, Clone)]
pub struct AzureSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    pub use_responses: bool,
}

impl AzureSettings {
    pub fn from_env() -> Self {
        Self {
            endpoint: env_nonempty("AZURE_OPENAI_ENDPOINT"),
            api_key: env_nonempty("AZURE_OPENAI_API_KEY"),
            api_version: env_nonempty("AZURE_OPENAI_API_VERSION"),
            deployment: env_nonempty("AZURE_OPENAI_DEPLOYMENT"),
            use_responses: matches!(
                std::env::var("AZURE_OPENAI_USE_RESPONSES").as_deref(),
                Ok("true") | Ok("1")
            ),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Azure OpenAI provider. Second in the waterfall; attempted only when the
/// OpenAI provider is unconfigured or failed.
pub struct AzureProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
    shape: RequestShape,
}

// -- Wire types ----------------------------------------------------------

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<WireMessage<'a>>,
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
struct ResponsesBody {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: Option<String>,
}

impl AzureProvider {
    /// `None` unless endpoint, key, API version, and deployment are all
    /// present. Partial configuration is treated as "not available", not
    /// as an error.
    pub fn from_settings(settings: AzureSettings) -> Option<Self> {
        Some(Self {
            client: Client::new(),
            endpoint: settings.endpoint?.trim_end_matches('/').to_string(),
            api_key: settings.api_key?,
            api_version: settings.api_version?,
            deployment: settings.deployment?,
            shape: if settings.use_responses {
                RequestShape::Responses
            } else {
                RequestShape::ChatCompletions
            },
        })
    }

    pub fn shape(&self) -> RequestShape {
        self.shape
    }

    fn request_url(&self) -> String {
        match self.shape {
            RequestShape::ChatCompletions => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.endpoint, self.deployment, self.api_version
            ),
            RequestShape::Responses => format!(
                "{}/openai/responses?api-version={}",
                self.endpoint, self.api_version
            ),
        }
    }
}

/// Chat-completions extraction: first choice's message content, else the
/// raw body.
fn extract_chat_reply(body: &str) -> String {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(resp) => {
            let content = resp
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .unwrap_or_default();
            if content.trim().is_empty() {
                warn!("azure chat response had no choice content, returning raw body");
                body.to_string()
            } else {
                content
            }
        }
        Err(e) => {
            warn!(err = %e, "azure chat response did not parse, returning raw body");
            body.to_string()
        }
    }
}

/// Responses-style extraction: `output_text`, else the first text entry of
/// the nested content array, else the raw body.
fn extract_responses_reply(body: &str) -> String {
    let parsed = match serde_json::from_str::<ResponsesBody>(body) {
        Ok(p) => p,
        Err(e) => {
            warn!(err = %e, "azure responses body did not parse, returning raw body");
            return body.to_string();
        }
    };

    if let Some(text) = parsed.output_text.filter(|t| !t.trim().is_empty()) {
        return text;
    }

    let nested = parsed
        .output
        .into_iter()
        .flat_map(|item| item.content)
        .find_map(|c| c.text.filter(|t| !t.trim().is_empty()));
    match nested {
        Some(text) => text,
        None => {
            warn!("azure responses body had no output text, returning raw body");
            body.to_string()
        }
    }
}

#[async_trait::async_trait]
impl ReplyProvider for AzureProvider {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn generate(&self, system_prompt: &str, transcript: &[ChatTurn]) -> Result<String> {
        let url = self.request_url();

        let mut messages = vec![WireMessage {
            role: "system",
            content: system_prompt,
        }];
        messages.extend(transcript.iter().map(|turn| WireMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        }));

        debug!(
            deployment = %self.deployment,
            shape = ?self.shape,
            turns = transcript.len(),
            "invoking Azure OpenAI API"
        );

        let req = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT);

        let resp = match self.shape {
            RequestShape::ChatCompletions => req.json(&ChatRequest { messages }),
            RequestShape::Responses => req.json(&ResponsesRequest {
                model: &self.deployment,
                input: messages,
            }),
        }
        .send()
        .await
        .map_err(|e| PortfolioError::Provider(format!("azure request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PortfolioError::Provider(format!("azure body read failed: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "azure API error");
            return Err(PortfolioError::Provider(format!(
                "azure returned {status}: {text}"
            )));
        }

        Ok(match self.shape {
            RequestShape::ChatCompletions => extract_chat_reply(&text),
            RequestShape::Responses => extract_responses_reply(&text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_settings(use_responses: bool) -> AzureSettings {
        AzureSettings {
            endpoint: Some("https://example.openai.azure.com/".to_string()),
            api_key: Some("key".to_string()),
            api_version: Some("2024-10-21".to_string()),
            deployment: Some("gpt-4o".to_string()),
            use_responses,
        }
    }

    #[test]
    fn all_four_fields_required() {
        assert!(AzureProvider::from_settings(full_settings(false)).is_some());

        for missing in 0..4 {
            let mut s = full_settings(false);
            match missing {
                0 => s.endpoint = None,
                1 => s.api_key = None,
                2 => s.api_version = None,
                _ => s.deployment = None,
            }
            assert!(AzureProvider::from_settings(s).is_none());
        }
    }

    #[test]
    fn flag_selects_responses_shape() {
        let chat = AzureProvider::from_settings(full_settings(false)).unwrap();
        assert_eq!(chat.shape(), RequestShape::ChatCompletions);

        let responses = AzureProvider::from_settings(full_settings(true)).unwrap();
        assert_eq!(responses.shape(), RequestShape::Responses);
    }

    #[test]
    fn request_urls_per_shape() {
        let chat = AzureProvider::from_settings(full_settings(false)).unwrap();
        assert_eq!(
            chat.request_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-10-21"
        );

        let responses = AzureProvider::from_settings(full_settings(true)).unwrap();
        assert_eq!(
            responses.request_url(),
            "https://example.openai.azure.com/openai/responses?api-version=2024-10-21"
        );
    }

    #[test]
    fn chat_extraction_reads_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"from azure"}}]}"#;
        assert_eq!(extract_chat_reply(body), "from azure");
        assert_eq!(extract_chat_reply("{}"), "{}");
    }

    #[test]
    fn responses_extraction_prefers_output_text() {
        let body = r#"{"output_text":"direct text","output":[]}"#;
        assert_eq!(extract_responses_reply(body), "direct text");
    }

    #[test]
    fn responses_extraction_falls_back_to_nested_content() {
        let body = r#"{"output":[{"content":[{"type":"output_text","text":"nested text"}]}]}"#;
        assert_eq!(extract_responses_reply(body), "nested text");
    }

    #[test]
    fn responses_extraction_degrades_to_raw_body() {
        let body = r#"{"output":[{"content":[]}]}"#;
        assert_eq!(extract_responses_reply(body), body);

        let not_json = "plain text";
        assert_eq!(extract_responses_reply(not_json), not_json);
    }
}
