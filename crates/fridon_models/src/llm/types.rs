//! Core types for LLM generation requests and responses.

use serde::{Deserialize, Serialize};

// ─────────────────────
// Request / Response
// ─────────────────────

/// A generation request to a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System prompt for the model.
    pub system: Option<String>,
    /// The messages to send to the model.
    pub messages: Vec<Message>,
    /// Sampling temperature (provider default when unset).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate (provider default when unset).
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Creates a new generation request with a user message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            system: None,
            messages: vec![Message::user(message)],
            temperature: None,
            max_tokens: None,
        }
    }

    /// Creates a new generation request with a system prompt and user message.
    #[must_use]
    pub fn with_system(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            messages: vec![Message::user(message)],
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the system prompt for the model.
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Adds conversation history before the current message.
    ///
    /// The messages provided will be prepended to the existing messages.
    #[must_use]
    pub fn history(mut self, mut messages: Vec<Message>) -> Self {
        messages.append(&mut self.messages);
        self.messages = messages;
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum number of tokens to generate.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A generation response from a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text.
    pub text: String,
    /// Token usage information.
    pub usage: Usage,
}

impl GenerationResponse {
    /// Returns the generated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the input.
    pub input_tokens: Option<u64>,
    /// Number of tokens in the output.
    pub output_tokens: Option<u64>,
    /// Total tokens (input + output).
    pub total_tokens: Option<u64>,
}

// ─────────────────────
// Messages
// ─────────────────────

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message from the user.
    User,
    /// A message from the assistant.
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl Message {
    /// Creates a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}
