pub mod chunker;
pub mod indexer;
pub mod retriever;
pub mod store;

pub use chunker::{chunk_text, Segment};
pub use indexer::{Document, Indexer, IndexingReport};
pub use retriever::{RetrievedContext, RetrievedMatch, Retriever, CONTEXT_DELIMITER};
