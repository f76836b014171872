use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::provider::{ChatProvider, EmbeddingProvider};
use super::types::{ChatMessage, ChatOutcome, ToolCall, ToolDescriptor};
use crate::core::config::Settings;
use crate::core::errors::ApiError;

/// OpenAI-compatible HTTP client covering both chat completions and
/// embeddings.
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            api_key: settings.openai_api_key.clone(),
            chat_model: settings.chat_model.clone(),
            embedding_model: settings.embedding_model.clone(),
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: WireAssistantMessage,
}

#[derive(Deserialize)]
struct WireAssistantMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ChatOutcome, ApiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut body = json!({
            "model": self.chat_model,
            "messages": messages,
        });
        if !tools.is_empty() {
            if let Some(obj) = body.as_object_mut() {
                let specs: Vec<_> = tools.iter().map(ToolDescriptor::as_tool_spec).collect();
                obj.insert("tools".to_string(), json!(specs));
                obj.insert("tool_choice".to_string(), json!("auto"));
            }
        }

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::chat)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Chat(format!(
                "chat completion failed ({}): {}",
                status, text
            )));
        }

        let payload: ChatCompletionResponse = res.json().await.map_err(ApiError::chat)?;
        let message = payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| ApiError::Chat("chat response contained no choices".to_string()))?;

        Ok(ChatOutcome {
            content: message.content,
            tool_calls: message.tool_calls,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| ApiError::Embedding("embedding response was empty".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ApiError> {
        let url = format!("{}/v1/embeddings", self.base_url);

        let body = json!({
            "input": texts,
            "model": self.embedding_model,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::embedding)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Embedding(format!(
                "embedding request failed ({}): {}",
                status, text
            )));
        }

        let payload: EmbeddingsResponse = res.json().await.map_err(ApiError::embedding)?;
        if payload.data.len() != texts.len() {
            return Err(ApiError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                payload.data.len()
            )));
        }

        Ok(payload.data.into_iter().map(|d| d.embedding).collect())
    }
}
