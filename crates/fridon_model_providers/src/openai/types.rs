//! OpenAI Chat Completions API types.
//!
//! These types match the OpenAI API specification.
//! See: <https://platform.openai.com/docs/api-reference/chat>

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for the Chat Completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// The model to use.
    pub model: String,
    /// Input messages, system prompt first when present.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions.
    System,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The message role.
    pub role: ChatRole,
    /// The message text.
    pub content: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Response body from the Chat Completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier.
    pub id: String,
    /// The model that produced the response.
    pub model: String,
    /// Generated choices (the pipeline uses the first).
    pub choices: Vec<ChatChoice>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// A single generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Position in the choices array.
    pub index: u32,
    /// The generated message.
    pub message: ChatMessage,
    /// Why generation stopped (`stop`, `length`, ...).
    pub finish_reason: Option<String>,
}

/// Token usage accounting.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
    /// Prompt + completion tokens.
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_optionals() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![ChatMessage {
                role: ChatRole::User,
                content: "hi".into(),
            }],
            temperature: None,
            max_tokens: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn response_parses_without_usage() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-3.5-turbo",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "hello"}, "finish_reason": "stop"}
            ]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices[0].message.content, "hello");
        assert!(response.usage.is_none());
    }
}
