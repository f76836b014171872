//! Query-time retrieval: embed the query and assemble a ranked context.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::store::VectorStore;
use crate::core::errors::ApiError;
use crate::llm::EmbeddingProvider;

/// Matched texts are joined with this delimiter to form the context string.
pub const CONTEXT_DELIMITER: &str = "\n---\n";

#[derive(Debug, Clone, Serialize)]
pub struct RetrievedMatch {
    pub text: String,
    pub source: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrievedContext {
    pub context: String,
    pub matches: Vec<RetrievedMatch>,
}

impl RetrievedContext {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            top_k,
        }
    }

    /// Embed `query`, fetch the top-k nearest records, and join their texts
    /// in store order. Zero matches yields an empty context, not an error;
    /// signaling "insufficient context" to the model is the caller's job.
    pub async fn retrieve(&self, query: &str) -> Result<RetrievedContext, ApiError> {
        let query_id = Uuid::new_v4();

        let vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| ApiError::Retrieval(format!("query embedding failed: {}", e)))?;

        let matches = self.store.query(&vector, self.top_k).await?;
        tracing::debug!("query {} matched {} records", query_id, matches.len());

        let context = matches
            .iter()
            .map(|m| m.metadata.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER);

        Ok(RetrievedContext {
            context,
            matches: matches
                .into_iter()
                .map(|m| RetrievedMatch {
                    text: m.metadata.text,
                    source: m.metadata.source,
                    score: m.score,
                })
                .collect(),
        })
    }
}
