use std::sync::Arc;

use crate::agent::AgentOrchestrator;
use crate::core::config::Settings;
use crate::llm::{ChatProvider, EmbeddingProvider, OpenAiClient};
use crate::rag::store::{MemoryVectorStore, PineconeStore, VectorStore};
use crate::rag::Retriever;
use crate::tools::{ToolRegistry, WeatherTool};

/// Application state shared across all routes.
///
/// The vector store and model services are shared, externally-owned
/// resources; everything request-scoped lives inside the orchestrator's
/// call, so no locks are needed here.
pub struct AppState {
    pub settings: Settings,
    pub orchestrator: AgentOrchestrator,
}

impl AppState {
    /// Wire the production collaborators: OpenAI for chat and embeddings,
    /// Pinecone for vectors (an in-memory store when no index host is
    /// configured), and the built-in weather tool.
    pub fn initialize(settings: Settings) -> Arc<Self> {
        let openai = Arc::new(OpenAiClient::new(&settings));

        let store: Arc<dyn VectorStore> = if settings.pinecone_index_host.trim().is_empty() {
            tracing::warn!("PINECONE_INDEX_HOST not set; using in-memory vector store");
            Arc::new(MemoryVectorStore::new())
        } else {
            Arc::new(PineconeStore::new(&settings))
        };

        Self::with_parts(settings, openai.clone(), openai, store)
    }

    /// Assemble state from explicit collaborators. Tests inject mocks here.
    pub fn with_parts(
        settings: Settings,
        chat: Arc<dyn ChatProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Arc<Self> {
        let retriever = Arc::new(Retriever::new(embedder, store, settings.top_k));

        let mut registry = ToolRegistry::new();
        registry.register(
            WeatherTool::descriptor(),
            Arc::new(WeatherTool::new(&settings)),
        );

        let orchestrator = AgentOrchestrator::new(chat, Arc::new(registry), retriever);

        Arc::new(Self {
            settings,
            orchestrator,
        })
    }
}
