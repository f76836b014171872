//! In-memory `VectorStore` for tests and local runs.
//!
//! Brute-force cosine similarity over all stored vectors. Ties keep
//! insertion order, which stands in for the remote store's tie order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{IndexRecord, QueryMatch, VectorStore};
use crate::core::errors::ApiError;

#[derive(Default)]
pub struct MemoryVectorStore {
    records: RwLock<Vec<IndexRecord>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of everything stored, in insertion order.
    pub async fn records(&self) -> Vec<IndexRecord> {
        self.records.read().await.clone()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&self, records: Vec<IndexRecord>) -> Result<(), ApiError> {
        let mut stored = self.records.write().await;
        for record in records {
            if let Some(existing) = stored.iter_mut().find(|r| r.id == record.id) {
                *existing = record;
            } else {
                stored.push(record);
            }
        }
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, ApiError> {
        let stored = self.records.read().await;
        let mut scored: Vec<QueryMatch> = stored
            .iter()
            .map(|record| QueryMatch {
                metadata: record.metadata.clone(),
                score: cosine_similarity(&record.values, vector),
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }
}
