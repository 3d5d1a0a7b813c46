//! Agent configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default model used when the caller does not pick one.
pub const DEFAULT_MODEL_ID: &str = "openai/gpt-3.5-turbo";

/// Default sampling temperature for analysis responses.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default lifetime for cached responses, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Tunable settings for a [`ResponseGenerator`](crate::graph::ResponseGenerator) run.
///
/// All fields have defaults so an empty config is a valid config.
/// Unknown fields in a JSON config object are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier in `provider/model` form.
    pub model_id: String,
    /// Sampling temperature passed through to the model.
    pub temperature: f32,
    /// How long generated responses stay cached.
    pub cache_ttl_secs: u64,
    /// Optional system prompt prepended to every request.
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            system_prompt: None,
        }
    }
}

impl AgentConfig {
    /// Builds a config from a loose JSON object, falling back to defaults
    /// for missing fields and ignoring unrecognised keys.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}
