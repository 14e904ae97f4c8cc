use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A text-generation endpoint that answers a single user prompt.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Returns the trimmed text of the first completion choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Chat-completions client for Together AI.
#[derive(Clone)]
pub struct TogetherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl TogetherClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.together_api_key.clone(),
            base_url: config.together_base_url.trim_end_matches('/').to_string(),
            model: config.together_model.clone(),
        }
    }
}

#[async_trait]
impl TextCompletion for TogetherClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingApiKey("Together"))?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = ServiceError::from_response(response).await;
            warn!("Together API error: {}", error);
            return Err(error);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        debug!(
            "Together completion ({} max tokens) took {} ms",
            request.max_tokens,
            start.elapsed().as_millis()
        );

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| ServiceError::Parse("No choices in completion response".to_string()))
    }
}
