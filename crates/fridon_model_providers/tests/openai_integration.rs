//! Integration tests for the OpenAI provider.
//!
//! These tests are ignored by default because they require:
//! - `OPENAI_API_KEY` environment variable (or in `.env` file)
//! - Network access to the OpenAI API
//! - May incur API costs
//!
//! To run these tests:
//! ```sh
//! cargo test -p fridon_model_providers --test openai_integration -- --ignored
//! ```

mod common;

use common::init_env;
use fridon_model_providers::openai::OpenAiProvider;
use fridon_models::ModelRegistry;
use fridon_models::llm::{GenerationRequest, Llm};
use std::sync::Arc;

const MODEL: &str = "openai/gpt-3.5-turbo";

fn get_llm(model_id: &str) -> Llm {
    init_env();

    let mut registry = ModelRegistry::new();
    registry.register_llm_provider(
        "openai",
        Arc::new(OpenAiProvider::from_env().expect("OPENAI_API_KEY should be set")),
    );
    registry.llm(model_id).expect("model should be valid")
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn test_basic_generation() {
    let request = GenerationRequest::new("Say 'hello' and nothing else.");

    let response = get_llm(MODEL)
        .generate(request)
        .await
        .expect("generation should succeed");

    let text = response.text().to_lowercase();
    assert!(
        text.contains("hello"),
        "response should contain 'hello': {text}"
    );
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn test_system_prompt() {
    let request = GenerationRequest::with_system(
        "You are a pirate. Always respond in pirate speak.",
        "Say hello",
    );

    let response = get_llm(MODEL)
        .generate(request)
        .await
        .expect("generation should succeed");

    assert!(!response.text().is_empty(), "response should not be empty");
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn test_invalid_model_error() {
    let request = GenerationRequest::new("Hello");
    let result = get_llm("openai/not-a-real-model").generate(request).await;

    assert!(result.is_err(), "should fail with invalid model");
}
