#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use ragent_backend::core::errors::ApiError;
use ragent_backend::llm::{
    ChatMessage, ChatOutcome, ChatProvider, EmbeddingProvider, FunctionCall, ToolCall,
};

/// Scripted chat provider: returns queued outcomes in order and records every
/// call so tests can assert on message sequences and call counts.
pub struct ScriptedChat {
    script: Mutex<Vec<ChatOutcome>>,
    calls: Mutex<Vec<RecordedCall>>,
}

pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub tool_count: usize,
}

impl ScriptedChat {
    pub fn new(outcomes: Vec<ChatOutcome>) -> Self {
        let mut script = outcomes;
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call(&self, index: usize) -> Vec<ChatMessage> {
        self.calls.lock().unwrap()[index].messages.clone()
    }

    pub fn tools_advertised(&self, index: usize) -> usize {
        self.calls.lock().unwrap()[index].tool_count
    }
}

#[async_trait]
impl ChatProvider for ScriptedChat {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ragent_backend::llm::ToolDescriptor],
    ) -> Result<ChatOutcome, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            tool_count: tools.len(),
        });
        self.script
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| ApiError::Chat("scripted chat exhausted".to_string()))
    }
}

pub fn text_outcome(content: &str) -> ChatOutcome {
    ChatOutcome {
        content: Some(content.to_string()),
        tool_calls: vec![],
    }
}

pub fn tool_call_outcome(calls: Vec<(&str, &str, &str)>) -> ChatOutcome {
    ChatOutcome {
        content: None,
        tool_calls: calls
            .into_iter()
            .map(|(id, name, arguments)| ToolCall {
                id: id.to_string(),
                kind: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            })
            .collect(),
    }
}

/// Embedder that maps known texts to fixed vectors; unknown texts get the
/// fallback. Lets tests choose exactly how the corpus and query relate.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
}

impl TableEmbedder {
    pub fn new(entries: Vec<(&str, Vec<f32>)>, fallback: Vec<f32>) -> Self {
        Self {
            table: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            fallback,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for TableEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        Ok(self
            .table
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ApiError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}

/// Embedder that fails for any text containing the poison marker.
pub struct PoisonedEmbedder {
    pub poison: String,
}

#[async_trait]
impl EmbeddingProvider for PoisonedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        if text.contains(&self.poison) {
            return Err(ApiError::Embedding("embedding backend refused".to_string()));
        }
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ApiError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}
