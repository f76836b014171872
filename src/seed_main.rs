//! One-shot corpus seeding: read every file under the docs directory, chunk
//! and embed it, and upsert the whole batch into the vector store.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};

use ragent_backend::core::{config::Settings, logging};
use ragent_backend::llm::OpenAiClient;
use ragent_backend::rag::store::{PineconeStore, VectorStore};
use ragent_backend::rag::{Document, Indexer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    logging::init(&settings.log_dir);
    settings.require_openai_key()?;
    if settings.pinecone_index_host.trim().is_empty() {
        bail!("PINECONE_INDEX_HOST is not configured");
    }

    let documents = read_corpus(&settings.docs_dir)?;
    if documents.is_empty() {
        bail!("no documents found in {}", settings.docs_dir.display());
    }

    let embedder = Arc::new(OpenAiClient::new(&settings));
    let store: Arc<dyn VectorStore> = Arc::new(PineconeStore::new(&settings));
    let indexer = Indexer::new(embedder, store, settings.chunk_max_chars);

    let report = indexer.index_corpus(&documents).await?;
    tracing::info!(
        "uploaded {} vectors from {} files",
        report.total_chunks,
        report.total_documents
    );

    Ok(())
}

/// Read every regular file in `dir` as one document. Files are visited in
/// name order so record ids are stable across runs.
fn read_corpus(dir: &Path) -> anyhow::Result<Vec<Document>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read docs dir {}", dir.display()))?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw_text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        documents.push(Document {
            id: source_name.clone(),
            source_name,
            raw_text,
        });
    }

    Ok(documents)
}
