//! Swap route quoting via Jupiter.

use crate::extract;
use fridon_blockchain::{BlockchainError, SwapService};
use fridon_core::{Plugin, PluginError, PluginFuture, PluginMetadata};
use serde_json::json;

/// Quotes a swap route when the message names two tokens and an amount.
#[derive(Debug, Default)]
pub struct JupiterPlugin {
    swap: SwapService,
}

impl JupiterPlugin {
    /// Creates the plugin against the public Jupiter quote API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the plugin over a specific swap service.
    #[must_use]
    pub fn with_service(swap: SwapService) -> Self {
        Self { swap }
    }
}

impl Plugin for JupiterPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "jupiter",
            description: "swap route quote between two tokens",
        }
    }

    fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a> {
        Box::pin(async move {
            let symbols = extract::symbols(message);
            let (Some(from_token), Some(to_token)) = (symbols.first(), symbols.get(1)) else {
                return Ok(None);
            };
            let Some(amount) = extract::amount(message) else {
                return Ok(None);
            };
            tracing::debug!(from_token, to_token, amount, "quoting swap route");

            let route = match self.swap.quote(from_token, to_token, amount).await {
                Ok(route) => route,
                // A pair outside the known-mint table means the message
                // was not a swap request after all.
                Err(BlockchainError::UnknownToken(_)) => return Ok(None),
                Err(err) => {
                    return Err(PluginError::execution_with_source(
                        format!("failed to quote {from_token} -> {to_token}"),
                        err,
                    ));
                }
            };

            let report = json!({
                "plugin": "jupiter",
                "route": route,
            });
            Ok(Some(serde_json::to_string(&report)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn needs_two_symbols() {
        let plugin = JupiterPlugin::new();
        let out = plugin.process("swap 1.5 SOL").await.unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn needs_an_amount() {
        let plugin = JupiterPlugin::new();
        let out = plugin.process("swap SOL for USDC").await.unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn unknown_pair_is_not_a_swap_request() {
        let plugin = JupiterPlugin::new();
        let out = plugin.process("compare BTC and ETH at 50000").await.unwrap();
        assert!(out.is_none());
    }
}
