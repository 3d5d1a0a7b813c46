//! Model provider interface and registry for Fridon.
//!
//! Provides a unified interface for LLM access, decoupling the generation
//! pipeline from provider implementations.
//!
//! # Overview
//!
//! - Provider-agnostic: consumers depend only on this crate, not specific
//!   provider crates.
//!
//! - Modular providers: provider crates register into a [`ModelRegistry`] at
//!   startup, allowing models to be swapped via configuration without code
//!   changes.
//!
//! # Example
//!
//! ```ignore
//! use fridon_models::{ModelRegistry, llm::GenerationRequest};
//!
//! let llm = registry.llm("openai/gpt-3.5-turbo")?;
//! let request = GenerationRequest::with_system("You are helpful", "Hello!");
//! let response = llm.generate(request).await?;
//! ```

pub mod error;
pub mod llm;
mod registry;

pub use error::CreateModelError;
pub use registry::ModelRegistry;
