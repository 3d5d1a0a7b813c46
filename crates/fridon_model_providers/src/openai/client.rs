//! OpenAI API client.

use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use fridon_models::llm::GenerationError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

/// HTTP client for the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_string(),
        }
    }

    /// Overrides the API base URL (for OpenAI-compatible endpoints).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends a chat completion request to the OpenAI API.
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GenerationError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, "sending chat completion request");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|err| GenerationError::Auth(format!("Invalid API key header: {err}")))?,
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|err| GenerationError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GenerationError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Provider {
                status: Some(status.as_u16()),
                message: body,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|err| {
            GenerationError::InvalidResponse(format!(
                "Failed to parse response: {err}\nBody: {body}"
            ))
        })
    }
}

impl core::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
