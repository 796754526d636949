//! Chat-completion client for OpenAI-compatible endpoints.

pub mod error;
pub mod openai;
pub mod types;

pub use error::AiError;
pub use openai::{AiConfig, OpenAiClient};
pub use types::{
    ChatCompletion, ChatMessage, ChatRequest, LlmClient, MessageRole, ToolCall, ToolDefinition,
};
