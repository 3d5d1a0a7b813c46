//! Response generation pipeline.
//!
//! The pipeline answers a user message in four stages: consult the
//! response cache, run every plugin over the message and collect the
//! context they contribute, render the analysis prompt, and call the
//! configured language model. Fresh answers are written back to the
//! cache before returning.

use crate::config::AgentConfig;
use crate::error::GenerateError;
use crate::plugin::Plugin;
use fridon_memory::{Memory, MemoryBackend};
use fridon_model_providers::openai::OpenAiProvider;
use fridon_models::llm::GenerationRequest;
use fridon_models::ModelRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A generated (or cache-served) answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The answer text.
    pub text: String,
    /// Whether the answer was served from the response cache.
    pub cached: bool,
    /// Names of the plugins that contributed context.
    pub sources: Vec<String>,
}

/// Runs the plugin-and-model pipeline for user messages.
pub struct ResponseGenerator {
    registry: ModelRegistry,
}

impl core::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("registry", &self.registry)
            .finish()
    }
}

impl ResponseGenerator {
    /// Creates a generator over an existing model registry.
    #[must_use]
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    /// Creates a generator with the OpenAI provider registered from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, GenerateError> {
        let mut registry = ModelRegistry::new();
        registry.register_llm_provider("openai", Arc::new(OpenAiProvider::from_env()?));
        Ok(Self::new(registry))
    }

    /// Generates a response to `message`.
    ///
    /// Plugins run in the order given; a plugin that fails is logged and
    /// skipped so the rest of the roster still contributes. The message
    /// itself is the cache key.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory backend, model resolution, or the
    /// model call fails.
    pub async fn generate(
        &self,
        message: &str,
        plugins: &[Arc<dyn Plugin>],
        config: &AgentConfig,
        backend: MemoryBackend,
    ) -> Result<AgentResponse, GenerateError> {
        let memory = backend.open()?;
        self.generate_with_memory(message, plugins, config, memory.as_ref())
            .await
    }

    /// Like [`generate`](Self::generate), but over a caller-provided store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store, model resolution, or the model call
    /// fails.
    pub async fn generate_with_memory(
        &self,
        message: &str,
        plugins: &[Arc<dyn Plugin>],
        config: &AgentConfig,
        memory: &dyn Memory,
    ) -> Result<AgentResponse, GenerateError> {
        if let Some(text) = memory.get(message)? {
            info!(message, "serving cached response");
            return Ok(AgentResponse {
                text,
                cached: true,
                sources: Vec::new(),
            });
        }

        let mut context = String::new();
        let mut sources = Vec::new();
        for plugin in plugins {
            let name = plugin.metadata().name;
            match plugin.process(message).await {
                Ok(Some(contribution)) => {
                    if !context.is_empty() {
                        context.push('\n');
                    }
                    context.push_str(&contribution);
                    sources.push(name.to_owned());
                }
                Ok(None) => debug!(plugin = name, "plugin contributed no context"),
                Err(error) => warn!(plugin = name, %error, "plugin failed, skipping"),
            }
        }

        let prompt = render_prompt(message, &context);
        let llm = self.registry.llm(&config.model_id)?;

        let mut request = GenerationRequest::new(prompt).temperature(config.temperature);
        if let Some(system) = &config.system_prompt {
            request = request.system(system.clone());
        }

        let response = llm.generate(request).await?;
        memory.set(message, response.text(), config.cache_ttl_secs)?;
        info!(
            model = config.model_id,
            sources = sources.len(),
            "generated fresh response"
        );

        Ok(AgentResponse {
            text: response.text,
            cached: false,
            sources,
        })
    }
}

/// Generates a response using providers configured from the environment.
///
/// Convenience wrapper over [`ResponseGenerator`] for callers that do not
/// need to inject a registry or a memory store.
///
/// # Errors
///
/// Returns an error if provider setup, the memory backend, or the model
/// call fails.
pub async fn generate_response(
    message: &str,
    plugins: &[Arc<dyn Plugin>],
    config: &AgentConfig,
    backend: MemoryBackend,
) -> Result<AgentResponse, GenerateError> {
    ResponseGenerator::from_env()?
        .generate(message, plugins, config, backend)
        .await
}

/// Renders the analysis prompt sent to the model.
fn render_prompt(message: &str, context: &str) -> String {
    format!(
        "Analyze the following cryptocurrency data and provide insights:\n\
         Context: {context}\n\
         User Message: {message}\n\n\
         Provide a detailed analysis including:\n\
         1. Technical Analysis\n\
         2. Market Sentiment\n\
         3. Recommendations"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginError, PluginFuture, PluginMetadata};
    use async_trait::async_trait;
    use fridon_memory::InProcessMemory;
    use fridon_models::llm::{
        GenerationError, GenerationResponse, LlmProvider, Usage,
    };

    /// Provider that echoes the prompt it was handed.
    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn generate(
            &self,
            _model: &str,
            request: GenerationRequest,
        ) -> Result<GenerationResponse, GenerationError> {
            Ok(GenerationResponse {
                text: request.messages[0].content.clone(),
                usage: Usage::default(),
            })
        }
    }

    struct FixedPlugin {
        name: &'static str,
        output: Option<&'static str>,
    }

    impl Plugin for FixedPlugin {
        fn metadata(&self) -> PluginMetadata {
            PluginMetadata {
                name: self.name,
                description: "test plugin",
            }
        }

        fn process<'a>(&'a self, _message: &'a str) -> PluginFuture<'a> {
            let output = self.output.map(str::to_owned);
            Box::pin(async move { Ok(output) })
        }
    }

    struct FailingPlugin;

    impl Plugin for FailingPlugin {
        fn metadata(&self) -> PluginMetadata {
            PluginMetadata {
                name: "failing",
                description: "always fails",
            }
        }

        fn process<'a>(&'a self, _message: &'a str) -> PluginFuture<'a> {
            Box::pin(async { Err(PluginError::execution("boom")) })
        }
    }

    fn test_generator() -> ResponseGenerator {
        let mut registry = ModelRegistry::new();
        registry.register_llm_provider("echo", Arc::new(EchoProvider));
        ResponseGenerator::new(registry)
    }

    fn test_config() -> AgentConfig {
        AgentConfig {
            model_id: "echo/test".to_owned(),
            ..AgentConfig::default()
        }
    }

    #[tokio::test]
    async fn prompt_carries_plugin_context_and_message() {
        let generator = test_generator();
        let memory = InProcessMemory::new();
        let plugins: Vec<Arc<dyn Plugin>> = vec![Arc::new(FixedPlugin {
            name: "rsi",
            output: Some("RSI: 61.2"),
        })];

        let response = generator
            .generate_with_memory("how is SOL doing?", &plugins, &test_config(), &memory)
            .await
            .unwrap();

        assert!(!response.cached);
        assert!(response.text.contains("Context: RSI: 61.2"));
        assert!(response.text.contains("User Message: how is SOL doing?"));
        assert!(response.text.contains("1. Technical Analysis"));
        assert_eq!(response.sources, vec!["rsi"]);
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let generator = test_generator();
        let memory = InProcessMemory::new();
        let plugins: Vec<Arc<dyn Plugin>> = Vec::new();

        let first = generator
            .generate_with_memory("hello", &plugins, &test_config(), &memory)
            .await
            .unwrap();
        let second = generator
            .generate_with_memory("hello", &plugins, &test_config(), &memory)
            .await
            .unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.text, second.text);
    }

    #[tokio::test]
    async fn failing_plugin_is_skipped_not_fatal() {
        let generator = test_generator();
        let memory = InProcessMemory::new();
        let plugins: Vec<Arc<dyn Plugin>> = vec![
            Arc::new(FailingPlugin),
            Arc::new(FixedPlugin {
                name: "working",
                output: Some("still here"),
            }),
        ];

        let response = generator
            .generate_with_memory("test", &plugins, &test_config(), &memory)
            .await
            .unwrap();

        assert_eq!(response.sources, vec!["working"]);
        assert!(response.text.contains("still here"));
    }

    #[tokio::test]
    async fn silent_plugins_leave_context_empty() {
        let generator = test_generator();
        let memory = InProcessMemory::new();
        let plugins: Vec<Arc<dyn Plugin>> = vec![Arc::new(FixedPlugin {
            name: "quiet",
            output: None,
        })];

        let response = generator
            .generate_with_memory("test", &plugins, &test_config(), &memory)
            .await
            .unwrap();

        assert!(response.sources.is_empty());
        assert!(response.text.contains("Context: \n"));
    }

    #[tokio::test]
    async fn unknown_model_id_is_an_error() {
        let generator = test_generator();
        let memory = InProcessMemory::new();
        let config = AgentConfig {
            model_id: "ghost/model".to_owned(),
            ..AgentConfig::default()
        };

        let result = generator
            .generate_with_memory("test", &[], &config, &memory)
            .await;
        assert!(matches!(result, Err(GenerateError::Model(_))));
    }
}
