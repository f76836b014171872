use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("embedding service error: {0}")]
    Embedding(String),
    #[error("chat service error: {0}")]
    Chat(String),
    #[error("weather service error: {0}")]
    Weather(String),
    #[error("vector store error: {0}")]
    VectorStore(String),
    #[error("retrieval error: {0}")]
    Retrieval(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn embedding<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Embedding(err.to_string())
    }

    pub fn chat<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Chat(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Embedding(_)
            | ApiError::Chat(_)
            | ApiError::Weather(_)
            | ApiError::VectorStore(_)
            | ApiError::Retrieval(_)
            | ApiError::Internal(_) => {
                // Full detail stays server-side; clients get a generic body.
                tracing::error!("request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
