//! OpenAI chat completions provider 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::config::CompletionSettings;
use crate::application::ports::CompletionProvider;
use crate::domain::review::Completion;
use crate::infrastructure::http::{build_api_client, send_json};

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    token: String,
}

impl OpenAiProvider {
    pub fn new(settings: &CompletionSettings) -> Self {
        Self {
            client: build_api_client(settings.timeout_secs),
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            token: settings.token.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: u64,
}

impl From<ChatResponse> for Completion {
    fn from(response: ChatResponse) -> Self {
        Completion {
            choices: response
                .choices
                .into_iter()
                .map(|c| c.message.content.unwrap_or_default())
                .collect(),
            token_usage: response.usage.map(|u| u.total_tokens).unwrap_or(0),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let endpoint = format!("{}/chat/completions", self.base_url);
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let request = self
            .client
            .post(endpoint)
            .bearer_auth(&self.token)
            .json(&payload);

        let response: ChatResponse = send_json("openai", "request chat completion", request).await?;
        Ok(response.into())
    }
}
