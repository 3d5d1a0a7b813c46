//! Model provider implementations for Fridon.
//!
//! Each provider lives in its own module and implements
//! [`fridon_models::llm::LlmProvider`]. The default stack ships the OpenAI
//! chat-completions provider, which the analysis pipeline uses for
//! `gpt-3.5-turbo`-class models.

pub mod openai;
