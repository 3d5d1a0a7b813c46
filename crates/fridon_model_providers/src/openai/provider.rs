//! OpenAI [`LlmProvider`] implementation.

use super::client::OpenAiClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole};
use async_trait::async_trait;
use fridon_models::llm::{
    GenerationError, GenerationRequest, GenerationResponse, LlmProvider, Role, Usage,
};

/// OpenAI [`LlmProvider`] implementation.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a new provider.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAiClient::new(api_key),
        }
    }

    /// Creates a provider reading the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Auth`] if the variable is not set.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            GenerationError::Auth("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let openai_request = convert_request(model, &request);

        let response = self.client.create_chat_completion(&openai_request).await?;

        convert_response(response)
    }
}

fn convert_request(model: &str, request: &GenerationRequest) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = &request.system {
        messages.push(ChatMessage {
            role: ChatRole::System,
            content: system.clone(),
        });
    }

    messages.extend(request.messages.iter().map(|message| ChatMessage {
        role: match message.role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        },
        content: message.content.clone(),
    }));

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

fn convert_response(
    response: ChatCompletionResponse,
) -> Result<GenerationResponse, GenerationError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        GenerationError::InvalidResponse("response contained no choices".to_string())
    })?;

    let usage = response
        .usage
        .map(|usage| Usage {
            input_tokens: Some(usage.prompt_tokens),
            output_tokens: Some(usage.completion_tokens),
            total_tokens: Some(usage.total_tokens),
        })
        .unwrap_or_default();

    Ok(GenerationResponse {
        text: choice.message.content,
        usage,
    })
}
