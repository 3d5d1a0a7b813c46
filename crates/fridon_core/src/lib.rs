//! Plugin framework and response generation pipeline for Fridon.
//!
//! The central entry point is [`ResponseGenerator`]: it takes a user
//! message and an ordered plugin roster, gathers context from the plugins
//! that recognise the message, and asks the configured language model for
//! an analysis. Answers are cached per message in a
//! [`fridon_memory`] backend.
//!
//! Plugins implement the object-safe [`Plugin`] trait and are shared as
//! `Arc<dyn Plugin>`. A plugin that fails never aborts a generation; the
//! pipeline logs the failure and continues with the rest of the roster.

pub mod config;
pub mod error;
pub mod graph;
pub mod plugin;
pub mod registry;
pub mod telemetry;

pub use config::AgentConfig;
pub use error::GenerateError;
pub use graph::{generate_response, AgentResponse, ResponseGenerator};
pub use plugin::{Plugin, PluginError, PluginFuture, PluginMetadata};
pub use registry::PluginRegistry;
pub use telemetry::{Telemetry, TracingFormat};
