pub mod orchestrator;

pub use orchestrator::{AgentOrchestrator, RagAnswer};
