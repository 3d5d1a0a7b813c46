//! Pipeline-level errors.

use fridon_memory::MemoryError;
use fridon_models::llm::GenerationError;
use fridon_models::CreateModelError;

/// Error returned by the response generation pipeline.
///
/// Individual plugin failures are logged and skipped rather than
/// surfaced here; this error covers the stages the pipeline cannot
/// continue without.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The response cache could not be read or written.
    #[error("memory backend failed")]
    Memory(#[from] MemoryError),

    /// The configured model could not be resolved.
    #[error("failed to resolve model")]
    Model(#[from] CreateModelError),

    /// The language model call failed.
    #[error("model generation failed")]
    Generation(#[from] GenerationError),
}
