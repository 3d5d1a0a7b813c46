//! Model provider registry.

use crate::error::CreateModelError;
use crate::llm::{Llm, LlmProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for model provider implementations.
///
/// Consumers access models using `provider/model` identifiers (e.g.,
/// `"openai/gpt-3.5-turbo"`); see [`llm()`](Self::llm). Provider crates
/// register themselves at startup via
/// [`register_llm_provider`](Self::register_llm_provider).
#[derive(Default)]
pub struct ModelRegistry {
    // Maps provider names to implementations.
    llm_providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("llm_providers", &self.llm_provider_names())
            .finish()
    }
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            llm_providers: HashMap::new(),
        }
    }

    /// Creates a handle to an [`Llm`].
    ///
    /// # Arguments
    ///
    /// * `model_id` - Identifier in `"provider/model"` format (e.g., `"openai/gpt-3.5-turbo"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the `model_id` structure is invalid or the provider
    /// is not registered.
    pub fn llm(&self, model_id: impl AsRef<str>) -> Result<Llm, CreateModelError> {
        let model_id = model_id.as_ref();

        let (provider_name, model_name) = model_id
            .split_once('/')
            .ok_or_else(|| CreateModelError::InvalidModelId(model_id.to_string()))?;

        let provider = self
            .get_llm_provider(provider_name)
            .ok_or_else(|| CreateModelError::UnknownProvider(provider_name.to_string()))?;

        Ok(Llm::new(provider, model_name.to_string()))
    }

    /// Registers an LLM provider.
    ///
    /// # Arguments
    ///
    /// * `name` - Provider name used in identifiers (e.g., `"openai"` for `"openai/gpt-3.5-turbo"`)
    /// * `provider` - The provider implementation
    ///
    /// # Panics
    ///
    /// Panics if a provider with the same name is already registered.
    pub fn register_llm_provider<P: LlmProvider>(
        &mut self,
        name: impl Into<String>,
        provider: Arc<P>,
    ) {
        let name = name.into();
        assert!(
            !self.llm_providers.contains_key(&name),
            "LLM provider '{name}' is already registered"
        );
        self.llm_providers
            .insert(name, provider as Arc<dyn LlmProvider>);
    }

    /// Returns a provider by name.
    #[must_use]
    pub fn get_llm_provider(&self, name: impl AsRef<str>) -> Option<Arc<dyn LlmProvider>> {
        self.llm_providers.get(name.as_ref()).cloned()
    }

    /// Checks if a provider is registered.
    #[must_use]
    pub fn has_llm_provider(&self, name: impl AsRef<str>) -> bool {
        self.llm_providers.contains_key(name.as_ref())
    }

    /// Lists registered provider names.
    #[must_use]
    pub fn llm_provider_names(&self) -> Vec<String> {
        self.llm_providers.keys().cloned().collect()
    }
}
