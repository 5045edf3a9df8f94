pub mod azure;
pub mod fallback;
pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::OwnerConfig;
use crate::content::SiteContext;
use crate::error::Result;

// -- Transcript types ----------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of the conversation. The caller supplies the full transcript
/// on every request; nothing is stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl Role {
    /// Wire name used by both provider request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// The single reply produced per request. `provider` names the upstream
/// that answered; `None` means the local template fallback did.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub content: String,
    pub provider: Option<&'static str>,
}

impl AssistantReply {
    pub fn is_mock(&self) -> bool {
        self.provider.is_none()
    }
}

// -- Provider trait ------------------------------------------------------

/// An upstream completion backend. Implementations are constructed fresh
/// per request from the environment and make exactly one HTTP attempt;
/// retry policy lives nowhere because there is none.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Tag surfaced in the response `provider` field (e.g. "openai").
    fn name(&self) -> &'static str;

    /// One completion attempt: system prompt prepended to the transcript.
    async fn generate(&self, system_prompt: &str, transcript: &[ChatTurn]) -> Result<String>;
}

/// Build the waterfall from the process environment, in priority order:
/// OpenAI first (cheaper, faster for this workload), Azure OpenAI second.
/// A provider missing its credentials is simply absent from the list.
pub fn providers_from_env() -> Vec<Box<dyn ReplyProvider>> {
    let mut providers: Vec<Box<dyn ReplyProvider>> = Vec::new();
    if let Some(p) = openai::OpenAiProvider::from_settings(openai::OpenAiSettings::from_env()) {
        providers.push(Box::new(p));
    }
    if let Some(p) = azure::AzureProvider::from_settings(azure::AzureSettings::from_env()) {
        providers.push(Box::new(p));
    }
    providers
}

// -- Waterfall -----------------------------------------------------------

/// Produce exactly one reply for the transcript: first provider to return
/// usable text wins, each is attempted at most once, and every failure is
/// absorbed. When no provider succeeds the keyword-routed local template
/// answers, so this function cannot fail.
pub async fn respond(
    providers: &[Box<dyn ReplyProvider>],
    transcript: &[ChatTurn],
    ctx: &SiteContext,
    owner: &OwnerConfig,
) -> AssistantReply {
    let system_prompt = prompt::system_prompt(owner, ctx);

    for provider in providers {
        match provider.generate(&system_prompt, transcript).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!(provider = provider.name(), "empty reply, trying next");
                    continue;
                }
                info!(
                    provider = provider.name(),
                    reply_len = text.len(),
                    "assistant reply from provider"
                );
                return AssistantReply {
                    content: text.to_string(),
                    provider: Some(provider.name()),
                };
            }
            Err(e) => {
                warn!(provider = provider.name(), err = %e, "provider attempt failed, trying next");
            }
        }
    }

    let question = transcript.last().map(|t| t.content.as_str()).unwrap_or("");
    info!(question_len = question.len(), "no provider available, using local fallback");
    AssistantReply {
        content: fallback::reply(question, ctx),
        provider: None,
    }
}
