//! Wallet balance lookups.

use crate::extract;
use fridon_blockchain::WalletService;
use fridon_core::{Plugin, PluginError, PluginFuture, PluginMetadata};
use serde_json::json;

/// Answers "balance of <address>" style questions with the SOL balance.
#[derive(Debug)]
pub struct WalletPlugin {
    wallet: WalletService,
}

impl Default for WalletPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletPlugin {
    /// Creates the plugin using the environment-configured RPC endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wallet: WalletService::from_env(),
        }
    }

    /// Creates the plugin over a specific wallet service.
    #[must_use]
    pub fn with_service(wallet: WalletService) -> Self {
        Self { wallet }
    }
}

impl Plugin for WalletPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "wallet",
            description: "SOL balance lookup for an account address",
        }
    }

    fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a> {
        Box::pin(async move {
            if !message.to_lowercase().contains("balance") {
                return Ok(None);
            }
            let Some(address) = extract::address(message) else {
                return Ok(None);
            };
            tracing::debug!(address, "looking up balance");

            let balance = self
                .wallet
                .get_balance(address, "SOL")
                .await
                .map_err(|err| {
                    PluginError::execution_with_source(
                        format!("failed to fetch balance of {address}"),
                        err,
                    )
                })?;

            let report = json!({
                "plugin": "wallet",
                "address": balance.address,
                "currency": balance.currency,
                "balance": balance.ui_amount,
            });
            Ok(Some(serde_json::to_string(&report)?))
        })
    }
}
