//! Page Layout Generator
//!
//! Uses the configured LLM to propose a page layout for a topic.

use anyhow::Result;
use std::sync::Arc;

use crate::client_factory::create_llm_client;
use crate::llm_client::LlmClient;
use crate::prompt::SitePrompt;

/// Layout generator primed with one site
pub struct PageLayoutGenerator {
    client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl PageLayoutGenerator {
    /// Create with a specific LLM client
    pub fn with_client(client: Arc<dyn LlmClient>, site: &SitePrompt) -> Self {
        Self {
            client,
            system_prompt: site.system_prompt(),
        }
    }

    /// Create from environment variables
    pub fn from_env(site: &SitePrompt) -> Result<Self> {
        Ok(Self::with_client(create_llm_client()?, site))
    }

    /// Ask for a layout and return the raw response text
    ///
    /// The text is expected to contain a JSON object but is returned
    /// untouched; models routinely wrap it in prose or code fences.
    pub async fn generate(&self, title: Option<&str>, description: Option<&str>) -> Result<String> {
        let user_prompt = SitePrompt::page_prompt(title, description);
        tracing::debug!(
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            prompt = %user_prompt,
            "requesting page layout"
        );
        let response = self.client.chat_json(&self.system_prompt, &user_prompt).await?;
        tracing::debug!(
            "layout response: {}",
            response.chars().take(500).collect::<String>()
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the prompts it receives and answers with a fixed text
    struct RecordingClient {
        reply: String,
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl LlmClient for RecordingClient {
        async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            Ok(self.reply.clone())
        }

        async fn chat_json(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
            self.chat(system_prompt, user_prompt).await
        }

        fn model_name(&self) -> &str {
            "recording"
        }

        fn provider_name(&self) -> &str {
            "Test"
        }
    }

    #[tokio::test]
    async fn test_generate_passes_site_and_page_prompts() {
        let client = Arc::new(RecordingClient {
            reply: "Sure! {\"components\": []}".to_string(),
            calls: Mutex::new(Vec::new()),
        });
        let site = SitePrompt::new("Acme", "a bakery");
        let generator = PageLayoutGenerator::with_client(client.clone(), &site);

        let raw = generator.generate(Some("Menu"), Some("what we bake")).await.unwrap();
        assert_eq!(raw, "Sure! {\"components\": []}");

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("The company name is Acme."));
        assert_eq!(
            calls[0].1,
            "create the page: Menu. the description of the page: what we bake"
        );
    }
}
