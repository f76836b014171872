pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiClient;
pub use provider::{ChatProvider, EmbeddingProvider};
pub use types::{ChatMessage, ChatOutcome, FunctionCall, ToolCall, ToolCallResult, ToolDescriptor};
