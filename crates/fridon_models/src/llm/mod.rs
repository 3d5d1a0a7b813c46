//! LLM (Large Language Model) generation capabilities.
//!
//! The core traits and types for text generation: a [`GenerationRequest`]
//! built from chat messages, the [`LlmProvider`] trait implemented by
//! provider crates, and the [`Llm`] handle consumers generate through.

mod error;
mod model;
mod provider;
mod types;

pub use error::GenerationError;
pub use model::Llm;
pub use provider::LlmProvider;
pub use types::{GenerationRequest, GenerationResponse, Message, Role, Usage};
