//! OpenAI chat-completions provider.

mod client;
mod provider;
mod types;

pub use client::OpenAiClient;
pub use provider::OpenAiProvider;
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, ChatUsage,
};
