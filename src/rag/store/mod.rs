//! VectorStore trait — abstract interface over the nearest-neighbor service.
//!
//! The store is an external collaborator: this system only upserts finished
//! records and reads top-k matches. The production implementation is
//! `PineconeStore`; `MemoryVectorStore` backs tests and local runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

pub mod memory;
pub mod pinecone;

pub use memory::MemoryVectorStore;
pub use pinecone::PineconeStore;

/// Metadata stored with each vector and returned with each match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub text: String,
    pub source: String,
}

/// One (id, vector, metadata) record. Written once, never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: RecordMetadata,
}

/// A scored nearest-neighbor match (higher = more similar).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMatch {
    pub metadata: RecordMetadata,
    pub score: f32,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Write a batch of records in one round trip.
    async fn upsert(&self, records: Vec<IndexRecord>) -> Result<(), ApiError>;

    /// Return up to `top_k` matches ranked by the store's similarity metric.
    /// Tie order is the store's own; it is not re-sorted by callers.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, ApiError>;
}
