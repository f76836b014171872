use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

/// Inbound body: `message` takes the tool-calling path, `query` the RAG
/// path. If both are present, `message` wins.
#[derive(Debug, Default, Deserialize)]
pub struct AgentRequest {
    pub message: Option<String>,
    pub query: Option<String>,
}

pub async fn agent(
    State(state): State<Arc<AppState>>,
    body: Option<Json<AgentRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();

    if let Some(message) = non_empty(request.message.as_deref()) {
        let answer = state.orchestrator.handle_message(message).await?;
        return Ok(Json(json!({ "answer": answer })));
    }

    if let Some(query) = non_empty(request.query.as_deref()) {
        let rag = state.orchestrator.handle_query(query).await?;
        return Ok(Json(json!({ "answer": rag.answer, "context": rag.context })));
    }

    Err(ApiError::BadRequest(
        "message or query is required".to_string(),
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
