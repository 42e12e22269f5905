//! Client Factory
//!
//! Picks the chat provider named by `AGENT_BACKEND` and builds its client.
//! Each provider reads its key from its own variable; OpenAI-compatible
//! gateways can be targeted with `OPENAI_BASE_URL`.

use anyhow::{anyhow, Result};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::anthropic_client::AnthropicClient;
use crate::llm_client::LlmClient;
use crate::openai_client::OpenAiClient;

/// Chat provider used for layout generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatProvider {
    #[default]
    Anthropic,
    OpenAi,
}

#[derive(Debug, Error)]
#[error("unknown AGENT_BACKEND '{0}' (expected anthropic, claude, openai, gpt or chatgpt)")]
pub struct UnknownProvider(String);

impl FromStr for ChatProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "anthropic" | "claude" => Ok(ChatProvider::Anthropic),
            "openai" | "gpt" | "chatgpt" => Ok(ChatProvider::OpenAi),
            _ => Err(UnknownProvider(name)),
        }
    }
}

impl ChatProvider {
    /// Variable holding the provider's API key
    pub fn key_var(self) -> &'static str {
        match self {
            ChatProvider::Anthropic => "ANTHROPIC_API_KEY",
            ChatProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Provider from `AGENT_BACKEND`; unset or blank means the default
    fn select(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup("AGENT_BACKEND").filter(|value| !value.trim().is_empty()) {
            Some(value) => Ok(value.parse()?),
            None => Ok(ChatProvider::default()),
        }
    }
}

/// Create the client selected by the environment
pub fn create_llm_client() -> Result<Arc<dyn LlmClient>> {
    create_llm_client_from(|key| std::env::var(key).ok())
}

fn create_llm_client_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Arc<dyn LlmClient>> {
    let provider = ChatProvider::select(&lookup)?;
    let api_key = lookup(provider.key_var())
        .ok_or_else(|| anyhow!("{} environment variable not set", provider.key_var()))?;

    let client: Arc<dyn LlmClient> = match provider {
        ChatProvider::Anthropic => Arc::new(AnthropicClient::new(api_key)),
        ChatProvider::OpenAi => match lookup("OPENAI_BASE_URL") {
            Some(url) => Arc::new(OpenAiClient::new(api_key).with_base_url(url)),
            None => Arc::new(OpenAiClient::new(api_key)),
        },
    };
    tracing::info!(
        provider = client.provider_name(),
        model = client.model_name(),
        "LLM client created"
    );
    Ok(client)
}
