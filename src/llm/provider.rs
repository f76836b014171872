use async_trait::async_trait;

use super::types::{ChatMessage, ChatOutcome, ToolDescriptor};
use crate::core::errors::ApiError;

/// Chat-completion seam. Implementations make exactly one network call per
/// invocation and never retry; retry policy belongs to the caller.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one chat completion. When `tools` is non-empty the model is
    /// allowed (not forced) to request tool calls.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ChatOutcome, ApiError>;
}

/// Embedding seam shared by indexing and querying. A corpus and the queries
/// against it must use the same model; that consistency lives in
/// configuration, not here.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError>;

    /// Order-preserving batch form; the result has the same length as the
    /// input.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ApiError>;
}
