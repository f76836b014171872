//! Pinecone-backed `VectorStore` over its HTTP data-plane API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{IndexRecord, QueryMatch, RecordMetadata, VectorStore};
use crate::core::config::Settings;
use crate::core::errors::ApiError;

#[derive(Clone)]
pub struct PineconeStore {
    index_host: String,
    api_key: String,
    client: Client,
}

impl PineconeStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            index_host: settings
                .pinecone_index_host
                .trim_end_matches('/')
                .to_string(),
            api_key: settings.pinecone_api_key.clone(),
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Deserialize)]
struct WireMatch {
    metadata: Option<RecordMetadata>,
    #[serde(default)]
    score: f32,
}

fn store_error<E: std::fmt::Display>(err: E) -> ApiError {
    ApiError::VectorStore(err.to_string())
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn upsert(&self, records: Vec<IndexRecord>) -> Result<(), ApiError> {
        let url = format!("{}/vectors/upsert", self.index_host);

        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&json!({ "vectors": records }))
            .send()
            .await
            .map_err(store_error)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::VectorStore(format!(
                "upsert failed ({}): {}",
                status, text
            )));
        }

        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, ApiError> {
        let url = format!("{}/query", self.index_host);

        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&json!({
                "vector": vector,
                "topK": top_k,
                "includeMetadata": true,
            }))
            .send()
            .await
            .map_err(store_error)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::VectorStore(format!(
                "query failed ({}): {}",
                status, text
            )));
        }

        let payload: QueryResponse = res.json().await.map_err(store_error)?;

        let matches = payload
            .matches
            .into_iter()
            .filter_map(|m| {
                if m.metadata.is_none() {
                    tracing::warn!("dropping match without metadata");
                }
                m.metadata.map(|metadata| QueryMatch {
                    metadata,
                    score: m.score,
                })
            })
            .collect();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn store_for(server: &MockServer) -> PineconeStore {
        let settings = Settings {
            pinecone_index_host: server.base_url(),
            pinecone_api_key: "pc-key".to_string(),
            ..Settings::default()
        };
        PineconeStore::new(&settings)
    }

    #[tokio::test]
    async fn upsert_posts_all_records_in_one_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/vectors/upsert")
                    .header("Api-Key", "pc-key")
                    .json_body_partial(
                        r#"{ "vectors": [{ "id": "doc-1" }, { "id": "doc-2" }] }"#,
                    );
                then.status(200).json_body(serde_json::json!({}));
            })
            .await;

        let records = vec![
            IndexRecord {
                id: "doc-1".to_string(),
                values: vec![0.1, 0.2],
                metadata: RecordMetadata {
                    text: "first".to_string(),
                    source: "a.txt".to_string(),
                },
            },
            IndexRecord {
                id: "doc-2".to_string(),
                values: vec![0.3, 0.4],
                metadata: RecordMetadata {
                    text: "second".to_string(),
                    source: "a.txt".to_string(),
                },
            },
        ];

        store_for(&server).upsert(records).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn query_maps_matches_in_store_order() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/query");
                then.status(200).json_body(serde_json::json!({
                    "matches": [
                        { "metadata": { "text": "top", "source": "a.txt" }, "score": 0.9 },
                        { "metadata": { "text": "next", "source": "b.txt" }, "score": 0.7 }
                    ]
                }));
            })
            .await;

        let matches = store_for(&server).query(&[0.1, 0.2], 3).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].metadata.text, "top");
        assert_eq!(matches[1].metadata.source, "b.txt");
    }

    #[tokio::test]
    async fn non_success_status_is_a_store_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/query");
                then.status(503).body("unavailable");
            })
            .await;

        let err = store_for(&server).query(&[0.1], 3).await.unwrap_err();
        assert!(matches!(err, ApiError::VectorStore(_)));
    }
}
