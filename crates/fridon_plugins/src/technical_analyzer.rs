//! Oscillator analysis over daily candles.

use crate::extract;
use fridon_analytics::indicators::ta;
use fridon_analytics::providers::BinanceProvider;
use fridon_core::{Plugin, PluginError, PluginFuture, PluginMetadata};
use serde_json::json;

/// Interval used for oscillator analysis.
const INTERVAL: &str = "1d";

/// Reports RSI, MACD, and Bollinger bands for a coin named in the message.
#[derive(Debug, Clone, Default)]
pub struct CoinTechnicalAnalyzerPlugin {
    binance: BinanceProvider,
}

impl CoinTechnicalAnalyzerPlugin {
    /// Creates the plugin against the public Binance API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the plugin over a specific provider.
    #[must_use]
    pub fn with_provider(binance: BinanceProvider) -> Self {
        Self { binance }
    }
}

impl Plugin for CoinTechnicalAnalyzerPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "coin-technical-analyzer",
            description: "RSI, MACD and Bollinger band analysis over daily candles",
        }
    }

    fn process<'a>(&'a self, message: &'a str) -> PluginFuture<'a> {
        Box::pin(async move {
            let Some(symbol) = extract::symbol(message) else {
                return Ok(None);
            };
            tracing::debug!(symbol, "running oscillator analysis");

            let snapshot = self
                .binance
                .ohlcv(symbol, INTERVAL)
                .await
                .map_err(|err| {
                    PluginError::execution_with_source(
                        format!("failed to fetch {symbol} market data"),
                        err,
                    )
                })?;
            let summary = ta::summarize(&snapshot.candles);

            let report = json!({
                "plugin": "coin-technical-analyzer",
                "symbol": symbol,
                "price": snapshot.current_price,
                "indicators": summary,
            });
            Ok(Some(serde_json::to_string(&report)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn message_without_symbol_is_ignored() {
        let plugin = CoinTechnicalAnalyzerPlugin::new();
        let out = plugin.process("tell me about the weather").await.unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn metadata_names_the_plugin() {
        assert_eq!(
            CoinTechnicalAnalyzerPlugin::new().metadata().name,
            "coin-technical-analyzer"
        );
    }
}
