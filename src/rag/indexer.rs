//! Corpus indexing: chunk, embed, and upsert in one all-or-nothing run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::chunker::chunk_text;
use super::store::{IndexRecord, RecordMetadata, VectorStore};
use crate::core::errors::ApiError;
use crate::llm::EmbeddingProvider;

/// A corpus file read for indexing. Not persisted; exists only to produce
/// chunks.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub source_name: String,
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexingReport {
    pub total_documents: usize,
    pub total_chunks: usize,
    pub finished_at: DateTime<Utc>,
}

pub struct Indexer {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chunk_max_chars: usize,
}

impl Indexer {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        chunk_max_chars: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            chunk_max_chars,
        }
    }

    /// Chunk and embed every document, then write all records in a single
    /// upsert. Record ids are `doc-<n>` with one counter across the run.
    ///
    /// Any embedding failure aborts before the upsert, so a failed run never
    /// commits a partial corpus.
    pub async fn index_corpus(&self, documents: &[Document]) -> Result<IndexingReport, ApiError> {
        let mut records: Vec<IndexRecord> = Vec::new();
        let mut next_id = 1usize;

        for document in documents {
            let segments = chunk_text(&document.raw_text, self.chunk_max_chars)?;
            tracing::debug!(
                "document {} ({}) produced {} chunks",
                document.id,
                document.source_name,
                segments.len()
            );

            for segment in segments {
                let values = self.embedder.embed(&segment.text).await?;
                records.push(IndexRecord {
                    id: format!("doc-{}", next_id),
                    values,
                    metadata: RecordMetadata {
                        text: segment.text,
                        source: document.source_name.clone(),
                    },
                });
                next_id += 1;
            }
        }

        let total_chunks = records.len();
        if !records.is_empty() {
            self.store.upsert(records).await?;
        }

        tracing::info!(
            "indexed {} chunks from {} documents",
            total_chunks,
            documents.len()
        );

        Ok(IndexingReport {
            total_documents: documents.len(),
            total_chunks,
            finished_at: Utc::now(),
        })
    }
}
