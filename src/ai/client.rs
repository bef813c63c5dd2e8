use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{LlmConfig, LlmError, LlmResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage { role: Role::User, content: content.into() }
    }
}

/// Body of an OpenAI-compatible chat-completions call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        ChatRequest {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A backend that answers chat-completion requests.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Returns the first choice's message content, trimmed. A response
    /// without content yields an empty string.
    async fn complete(&self, request: ChatRequest) -> LlmResult<String>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion client for OpenRouter (or any compatible aggregator).
#[derive(Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    referer: String,
    title: String,
}

impl OpenRouterClient {
    pub fn new(config: &LlmConfig, title: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), config, title)
    }

    pub fn with_http_client(http: reqwest::Client, config: &LlmConfig, title: impl Into<String>) -> Self {
        OpenRouterClient {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            referer: config.site_url.clone(),
            title: title.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatCompletion for OpenRouterClient {
    async fn complete(&self, request: ChatRequest) -> LlmResult<String> {
        tracing::debug!(model = %request.model, max_tokens = request.max_tokens, "Calling chat completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .filter(|m| !m.is_empty());
            tracing::warn!(status = status.as_u16(), model = %request.model, ?message, "Upstream rejected request");
            return Err(LlmError::Upstream { status: status.as_u16(), message });
        }

        let body = response.bytes().await?;
        let parsed: CompletionResponse =
            serde_json::from_slice(&body).map_err(|e| LlmError::Decode(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_openai_shape() {
        let request = ChatRequest::new("deepseek/deepseek-chat", "sys", "usr")
            .max_tokens(1834)
            .temperature(0.5);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "deepseek/deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "usr");
        assert_eq!(body["max_tokens"], 1834);
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn endpoint_joins_base_url() {
        let config = LlmConfig::new("k").with_base_url("http://127.0.0.1:9000/api/v1/");
        let client = OpenRouterClient::new(&config, "AI Report Generator");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9000/api/v1/chat/completions");
    }
}
