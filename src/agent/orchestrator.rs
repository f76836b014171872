//! Agent orchestration: the two-call tool-dispatch state machine and the
//! retrieval-grounded answer path.
//!
//! A request goes through at most one round of tool dispatch. The model never
//! sees tool results and then gets to request more tools, which bounds every
//! request to two model calls plus one tool fan-out.

use std::sync::Arc;

use serde::Serialize;

use crate::core::errors::ApiError;
use crate::llm::{ChatMessage, ChatProvider};
use crate::rag::Retriever;
use crate::tools::ToolRegistry;

const AGENT_SYSTEM_PROMPT: &str = "You are a helpful assistant. If the user asks about the weather in a city, call the getWeather function.";

const FINALIZE_SYSTEM_PROMPT: &str = "You are a helpful assistant. When tools are used, compose a concise final answer for the user.";

const RAG_SYSTEM_PROMPT: &str = "You are a helpful AI assistant with access to context. Use the following information to answer the user's question. If the context is not enough, say you don't know.";

#[derive(Debug, Clone, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    pub context: String,
}

pub struct AgentOrchestrator {
    chat: Arc<dyn ChatProvider>,
    registry: Arc<ToolRegistry>,
    retriever: Arc<Retriever>,
}

impl AgentOrchestrator {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        registry: Arc<ToolRegistry>,
        retriever: Arc<Retriever>,
    ) -> Self {
        Self {
            chat,
            registry,
            retriever,
        }
    }

    /// Tool-calling path.
    ///
    /// Drafting: one chat call with every registered tool advertised. If the
    /// model requests no tools, its content is the final answer. Otherwise
    /// each request is dispatched through the registry in order (unregistered
    /// names are skipped, not fatal) and a second chat call folds the results
    /// into the final answer.
    pub async fn handle_message(&self, message: &str) -> Result<String, ApiError> {
        let user = ChatMessage::user(message);
        let descriptors = self.registry.descriptors();

        let first = self
            .chat
            .chat(
                &[ChatMessage::system(AGENT_SYSTEM_PROMPT), user.clone()],
                &descriptors,
            )
            .await?;

        if !first.has_tool_calls() {
            return Ok(first.answer_text());
        }

        let mut tool_messages = Vec::with_capacity(first.tool_calls.len());
        for call in &first.tool_calls {
            let Some(tool) = self.registry.resolve(&call.function.name) else {
                tracing::warn!(
                    "model requested unregistered tool `{}`; skipping",
                    call.function.name
                );
                continue;
            };
            tracing::info!("dispatching tool `{}` ({})", call.function.name, call.id);
            let result = tool.invoke(call).await?;
            tool_messages.push(result.into_message());
        }

        let mut messages = vec![
            ChatMessage::system(FINALIZE_SYSTEM_PROMPT),
            user,
            first.assistant_message(),
        ];
        messages.extend(tool_messages);

        let second = self.chat.chat(&messages, &[]).await?;
        Ok(second.answer_text())
    }

    /// RAG path: retrieve a ranked context for `query` and ground a single
    /// chat call in it. An empty context is not an error; the prompt wording
    /// tells the model to admit when the context is insufficient.
    pub async fn handle_query(&self, query: &str) -> Result<RagAnswer, ApiError> {
        let retrieved = self.retriever.retrieve(query).await?;
        if retrieved.is_empty() {
            tracing::debug!("no matches retrieved; answering with empty context");
        }

        let messages = [
            ChatMessage::system(RAG_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Context:\n{}\n\nQuestion: {}",
                retrieved.context, query
            )),
        ];

        let outcome = self.chat.chat(&messages, &[]).await?;
        let answer = match outcome.content {
            Some(content) if !content.is_empty() => content,
            _ => "No answer".to_string(),
        };

        Ok(RagAnswer {
            answer,
            context: retrieved.context,
        })
    }
}
