//! A plugin-driven crypto analysis agent.
//!
//! Fridon answers user questions about coins, wallets, and swaps: a
//! fixed roster of plugins pulls market and on-chain context out of the
//! message, and a language model turns that context into an analysis.
//! Answers are cached per message.
//!
//! [`analyze_coin`] is the whole public surface for typical use:
//!
//! ```no_run
//! use fridon::{analyze_coin, AgentConfig};
//!
//! # async fn run() -> Result<(), fridon::GenerateError> {
//! let response = analyze_coin("how is SOL doing?", &AgentConfig::default()).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub use fridon_analytics;
pub use fridon_blockchain;
pub use fridon_core;
pub use fridon_memory;
pub use fridon_model_providers;
pub use fridon_models;
pub use fridon_plugins;

pub use fridon_core::{AgentConfig, AgentResponse, GenerateError, Plugin, ResponseGenerator};
use fridon_memory::MemoryBackend;
use fridon_plugins::{
    CoinObserverPlugin, CoinTechnicalAnalyzerPlugin, CoinTechnicalChartSearcherPlugin,
    JupiterPlugin, WalletPlugin,
};
use std::sync::Arc;

/// Re-export of the types most callers need.
pub mod prelude {
    pub use crate::{analyze_coin, analyze_coin_with, default_plugins};
    pub use fridon_core::{
        AgentConfig, AgentResponse, GenerateError, Plugin, PluginError, PluginMetadata,
        PluginRegistry, ResponseGenerator, Telemetry, TracingFormat,
    };
    pub use fridon_memory::MemoryBackend;
}

/// Builds the default plugin roster, in pipeline order.
#[must_use]
pub fn default_plugins() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(CoinTechnicalAnalyzerPlugin::new()),
        Arc::new(CoinTechnicalChartSearcherPlugin::new()),
        Arc::new(CoinObserverPlugin::new()),
        Arc::new(WalletPlugin::new()),
        Arc::new(JupiterPlugin::new()),
    ]
}

/// Analyzes a user message with the default plugin roster and the SQLite
/// response cache.
///
/// Thin front door over [`fridon_core::generate_response`]: constructs
/// the plugins and passes the message and config straight through.
///
/// # Errors
///
/// Returns an error if provider setup, the memory backend, or the model
/// call fails. Individual plugin failures are logged and skipped.
pub async fn analyze_coin(
    message: &str,
    config: &AgentConfig,
) -> Result<AgentResponse, GenerateError> {
    analyze_coin_with(&ResponseGenerator::from_env()?, message, config).await
}

/// Like [`analyze_coin`], but over a caller-provided generator.
///
/// Lets callers reuse one generator across calls or register their own
/// providers; everything else — the roster and the memory backend — is
/// identical to [`analyze_coin`].
///
/// # Errors
///
/// Returns an error if the memory backend, model resolution, or the model
/// call fails.
pub async fn analyze_coin_with(
    generator: &ResponseGenerator,
    message: &str,
    config: &AgentConfig,
) -> Result<AgentResponse, GenerateError> {
    generator
        .generate(message, &default_plugins(), config, MemoryBackend::Sqlite)
        .await
}
